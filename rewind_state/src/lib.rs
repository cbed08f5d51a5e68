//! Collaborator contracts for the rewind core.
//!
//! The rewind core never touches emulated hardware directly. Everything it
//! needs from the live machine is expressed as four small traits:
//! [StateSerializer] and [DisplaySerializer] turn machine and display state
//! into opaque byte buffers and back, [ClockSource] exposes the emulated
//! time counters, and [MessageSink] receives on-screen messages. [Machine]
//! bundles the four for code that needs all of them.
//!
//! The byte-level layout of the serialized buffers is owned entirely by the
//! implementor; the rewind core stores and replays them without inspection.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use error::*;
pub use traits::*;

mod error;
mod traits;
