use std::{error::Error, fmt};

use rewind_state::StateError;

/// Errors from capture and rewind operations.
///
/// None of these are fatal; the caller can retry or ignore them. The boolean
/// API on [RewindManager](crate::RewindManager) reports them as `false`.
#[derive(Debug, Clone)]
pub enum RewindError {
    /// A collaborator failed while serializing the current state. History is
    /// left unmodified; no partial snapshot is ever inserted.
    Capture(StateError),
    /// A collaborator failed while loading a snapshot back into the machine.
    Restore(StateError),
    /// Rewind or unwind was attempted with no stored snapshots.
    EmptyHistory,
    /// A single-step rewind was attempted with no earlier snapshot to move to.
    AtOldest,
}

impl fmt::Display for RewindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewindError::Capture(error) => write!(f, "failed to capture state: {}", error),
            RewindError::Restore(error) => write!(f, "failed to restore state: {}", error),
            RewindError::EmptyHistory => write!(f, "no states have been saved"),
            RewindError::AtOldest => write!(f, "already at the oldest saved state"),
        }
    }
}

impl Error for RewindError {}
