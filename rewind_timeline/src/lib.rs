//! Bounded-memory rewind for an emulated machine.
//!
//! There are three components to the rewind core:
//! - A [Machine](rewind_state::Machine) implementation which provides save
//!   state, display serialization, and clock access
//! - [HistoryStore] which owns the captured [Snapshot]s in chronological
//!   order, with a cursor marking the current point in time
//! - [RewindManager] which orchestrates capture, compaction, and restore
//!   against the store and the machine
//!
//! # Note on retention
//!
//! The store never grows past [RetentionPolicy::max_size]. When a capture
//! would exceed the cap, runs of equally-spaced older snapshots are thinned
//! first, so the history keeps fine-grained entries near the present and
//! progressively coarser entries further back. The
//! [single_steps](RetentionPolicy::single_steps) most recent snapshots are
//! never touched, keeping single-step rewinds near the present exact, and
//! the oldest snapshot is kept as an anchor for maximum-depth rewinds.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use compact::*;
pub use error::*;
pub use manager::*;
pub use message::*;
pub use store::*;

mod compact;
mod error;
mod manager;
mod message;
mod store;
