/// Nested units of emulated elapsed time, smallest to largest: cycles,
/// scanlines, frames, seconds, minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Cycles per scanline.
    pub cycles_per_scanline: u64,
    /// Scanlines per frame.
    pub scanlines_per_frame: u64,
    /// Frames per second.
    pub frames_per_second: u64,
}

impl Timing {
    /// The primary timing standard: 76 cycles per scanline, 262 scanlines
    /// per frame, 60 frames per second.
    pub const NTSC: Timing = Timing {
        cycles_per_scanline: 76,
        scanlines_per_frame: 262,
        frames_per_second: 60,
    };

    /// Cycles in one frame.
    pub fn frame_cycles(&self) -> u64 {
        self.cycles_per_scanline * self.scanlines_per_frame
    }

    /// Cycles in one second.
    pub fn second_cycles(&self) -> u64 {
        self.frame_cycles() * self.frames_per_second
    }

    /// Cycles in one minute.
    pub fn minute_cycles(&self) -> u64 {
        self.second_cycles() * 60
    }

    /// Format a cycle delta as a duration in the coarsest unit with
    /// magnitude at least one.
    ///
    /// A negative delta reads as "Unwind" (forward), non-negative as
    /// "Rewind".
    pub fn format_delta(&self, delta: i64) -> String {
        let (direction, magnitude) = if delta < 0 {
            ("Unwind", delta.unsigned_abs())
        } else {
            ("Rewind", delta as u64)
        };

        if magnitude < self.cycles_per_scanline {
            format!("{} {} cycle(s)", direction, magnitude)
        } else if magnitude < self.frame_cycles() {
            format!(
                "{} {} scanline(s)",
                direction,
                magnitude / self.cycles_per_scanline
            )
        } else if magnitude < self.second_cycles() {
            format!("{} {} frame(s)", direction, magnitude / self.frame_cycles())
        } else if magnitude < self.minute_cycles() {
            format!(
                "{} {} second(s)",
                direction,
                magnitude / self.second_cycles()
            )
        } else {
            format!(
                "{} {} minute(s)",
                direction,
                magnitude / self.minute_cycles()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_coarsest_unit_with_nonzero_magnitude() {
        let timing = Timing::NTSC;
        assert_eq!(timing.format_delta(50), "Rewind 50 cycle(s)");
        assert_eq!(timing.format_delta(152), "Rewind 2 scanline(s)");
        assert_eq!(timing.format_delta(76 * 262 * 5), "Rewind 5 frame(s)");
        assert_eq!(timing.format_delta(76 * 262 * 60 * 2), "Rewind 2 second(s)");
        assert_eq!(
            timing.format_delta(76 * 262 * 60 * 60 * 3),
            "Rewind 3 minute(s)"
        );
    }

    #[test]
    fn unit_boundaries_are_exact() {
        let timing = Timing::NTSC;
        assert_eq!(timing.format_delta(75), "Rewind 75 cycle(s)");
        assert_eq!(timing.format_delta(76), "Rewind 1 scanline(s)");
        assert_eq!(timing.format_delta(76 * 262 - 1), "Rewind 261 scanline(s)");
        assert_eq!(timing.format_delta(76 * 262), "Rewind 1 frame(s)");
    }

    #[test]
    fn negative_delta_reads_as_unwind() {
        let timing = Timing::NTSC;
        assert_eq!(timing.format_delta(-50), "Unwind 50 cycle(s)");
        assert_eq!(timing.format_delta(-152), "Unwind 2 scanline(s)");
    }
}
