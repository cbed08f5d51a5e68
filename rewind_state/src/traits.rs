use crate::StateError;

/// Serializes and restores the emulated machine state.
pub trait StateSerializer {
    /// Append the current machine state to `out`.
    fn save_state(&mut self, out: &mut Vec<u8>) -> Result<(), StateError>;

    /// Restore the machine state from a buffer previously filled by
    /// [save_state](StateSerializer::save_state).
    fn load_state(&mut self, data: &[u8]) -> Result<(), StateError>;
}

/// Serializes and restores the display/device state.
///
/// Same shape as [StateSerializer]; kept separate because the display is
/// captured and restored by a different collaborator than the machine core.
pub trait DisplaySerializer {
    /// Append the current display state to `out`.
    fn save_display(&mut self, out: &mut Vec<u8>) -> Result<(), StateError>;

    /// Restore the display state from a buffer previously filled by
    /// [save_display](DisplaySerializer::save_display).
    fn load_display(&mut self, data: &[u8]) -> Result<(), StateError>;
}

/// Emulated time counters.
pub trait ClockSource {
    /// Total elapsed cycles. Monotonically increasing while the machine runs
    /// forward; jumps backward when a snapshot is restored.
    fn current_cycles(&self) -> u64;

    /// Total elapsed video frames.
    fn current_frames(&self) -> u64;

    /// Number of scanlines in the most recently completed frame.
    fn scanlines_last_frame(&self) -> u32;
}

/// Receives user-facing messages. Fire-and-forget.
pub trait MessageSink {
    /// Display `text` to the user.
    fn show_message(&mut self, text: &str);
}

/// Everything the rewind core needs from the live machine.
///
/// Blanket-implemented for any type providing the four collaborator traits.
pub trait Machine: StateSerializer + DisplaySerializer + ClockSource + MessageSink {}

impl<T: StateSerializer + DisplaySerializer + ClockSource + MessageSink> Machine for T {}
