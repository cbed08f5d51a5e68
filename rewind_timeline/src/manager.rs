use std::fmt;

use rewind_state::Machine;

use crate::{
    compact::{compress, RetentionPolicy},
    error::RewindError,
    message::Timing,
    store::{HistoryStore, Snapshot},
};

/// Selects how far a single rewind request travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewindMode {
    /// Step back exactly one captured state (debugger-style stepping).
    Fine,
    /// Step back far enough to be perceptible during live emulation: at
    /// least three quarters of one frame's cycles.
    Coarse,
}

/// Orchestrates capture, rewind, and unwind over a single linear timeline.
///
/// Owns the [Machine] collaborator and the [HistoryStore]. The manager is
/// "steady" when the cursor is at the tail and "rewound" after a rewind;
/// capturing while rewound discards every state ahead of the rewind point,
/// so the timeline never branches.
pub struct RewindManager<M: Machine> {
    machine: M,
    store: HistoryStore,
    policy: RetentionPolicy,
    timing: Timing,
    /// Debug stat counting successful captures over the manager's lifetime.
    num_captures: u64,
}

impl<M: Machine> RewindManager<M> {
    /// A manager with the default retention policy and NTSC timing.
    pub fn new(machine: M) -> Self {
        Self::with_policy(machine, RetentionPolicy::default(), Timing::NTSC)
    }

    /// A manager with explicit retention and timing parameters.
    pub fn with_policy(machine: M, policy: RetentionPolicy, timing: Timing) -> Self {
        Self {
            machine,
            store: HistoryStore::new(),
            policy,
            timing,
            num_captures: 0,
        }
    }

    /// Capture the current machine and display state as a new snapshot.
    ///
    /// On failure the history is left unmodified and the error is logged.
    /// `message` describes the capture and is recorded in the trace log.
    pub fn add_state(&mut self, message: &str) -> bool {
        match self.try_add_state(message) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, "state capture failed");
                false
            }
        }
    }

    /// [add_state](Self::add_state), reporting the failure reason.
    pub fn try_add_state(&mut self, message: &str) -> Result<(), RewindError> {
        let mut state = Vec::new();
        self.machine
            .save_state(&mut state)
            .map_err(RewindError::Capture)?;
        let mut display = Vec::new();
        self.machine
            .save_display(&mut display)
            .map_err(RewindError::Capture)?;

        // A new capture invalidates every state ahead of the rewind point.
        let cursor = self.store.cursor();
        self.store.truncate_from(cursor);
        if self.store.len() >= self.policy.max_size {
            compress(&mut self.store, &self.policy);
        }

        let cycles = self.machine.current_cycles();
        let frames = self.machine.current_frames();
        self.store.append(Snapshot::new(state, display, cycles, frames));
        self.num_captures += 1;
        tracing::trace!(
            cycles,
            frames,
            display_message = message,
            len = self.store.len(),
            "captured state"
        );
        Ok(())
    }

    /// Move backward through history and restore the selected snapshot.
    ///
    /// Returns `false` (after logging) if there is nothing to rewind to.
    pub fn rewind(&mut self, mode: RewindMode) -> bool {
        match self.try_rewind(mode) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, "rewind failed");
                false
            }
        }
    }

    /// [rewind](Self::rewind), reporting the failure reason.
    pub fn try_rewind(&mut self, mode: RewindMode) -> Result<(), RewindError> {
        if self.store.is_empty() {
            return Err(RewindError::EmptyHistory);
        }
        // When steady the newest snapshot is the present, so it counts as
        // the current position.
        let current = self.store.cursor().min(self.store.len() - 1);

        let target = match mode {
            RewindMode::Fine => current.checked_sub(1).ok_or(RewindError::AtOldest)?,
            RewindMode::Coarse => {
                let now = self.machine.current_cycles();
                let threshold = self.timing.frame_cycles() * 3 / 4;
                let states = self.store.states();
                (0..=current)
                    .rev()
                    .find(|&index| now.saturating_sub(states[index].cycles()) >= threshold)
                    .unwrap_or(0)
            }
        };

        self.restore(target)
    }

    /// Move forward through history.
    ///
    /// Forward replay is not implemented; the cursor does not move. Returns
    /// `true` iff history is non-empty, mirroring [rewind](Self::rewind)'s
    /// emptiness check.
    pub fn unwind(&mut self, _mode: RewindMode) -> bool {
        if self.store.is_empty() {
            tracing::debug!(error = %RewindError::EmptyHistory, "unwind failed");
            return false;
        }
        tracing::debug!("unwind requested; forward replay is not implemented");
        true
    }

    /// Single-step rewind, for debugger use.
    pub fn rewind_debugger(&mut self) -> bool {
        self.rewind(RewindMode::Fine)
    }

    /// Perceptible rewind, for live emulation use.
    pub fn rewind_emulation(&mut self) -> bool {
        self.rewind(RewindMode::Coarse)
    }

    /// Single-step unwind, for debugger use.
    pub fn unwind_debugger(&mut self) -> bool {
        self.unwind(RewindMode::Fine)
    }

    /// Perceptible unwind, for live emulation use.
    pub fn unwind_emulation(&mut self) -> bool {
        self.unwind(RewindMode::Coarse)
    }

    /// Whether no snapshots are retained.
    pub fn empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Discard all history and return to the steady state.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Read-only view of the retained history.
    pub fn history(&self) -> &HistoryStore {
        &self.store
    }

    /// Number of successful captures over the manager's lifetime.
    pub fn num_captures(&self) -> u64 {
        self.num_captures
    }

    /// The owned machine collaborator.
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Mutable access to the owned machine collaborator.
    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    /// Destruct into the machine collaborator, dropping all history.
    pub fn into_machine(self) -> M {
        self.machine
    }

    /// Log the frame spacing of the retained history at trace level.
    pub fn trace_history(&self) {
        let mut last_frames = self.store.oldest().map_or(0, Snapshot::frames);
        let deltas: Vec<u64> = self
            .store
            .iter()
            .map(|snapshot| {
                let delta = snapshot.frames() - last_frames;
                last_frames = snapshot.frames();
                delta
            })
            .collect();
        tracing::trace!(?deltas, "history frame spacing");
    }

    fn restore(&mut self, index: usize) -> Result<(), RewindError> {
        let now = self.machine.current_cycles();
        let scanlines = self.machine.scanlines_last_frame();

        let snapshot = &self.store.states()[index];
        self.machine
            .load_state(snapshot.state())
            .map_err(RewindError::Restore)?;
        self.machine
            .load_display(snapshot.display())
            .map_err(RewindError::Restore)?;
        let delta = now as i64 - snapshot.cycles() as i64;

        self.store.set_cursor(index);
        let text = self.timing.format_delta(delta);
        self.machine.show_message(&text);
        tracing::debug!(index, delta, scanlines, "restored state");
        Ok(())
    }
}

impl<M: Machine> fmt::Debug for RewindManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewindManager")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .field("num_captures", &self.num_captures)
            .finish_non_exhaustive()
    }
}
