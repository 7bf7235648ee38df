use std::thread;
use std::time::{Duration, Instant};

use crate::utils::FRAME_BUDGET;

/// Caps the frame rate by sleeping off whatever is left of a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    budget: Duration,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self { budget: FRAME_BUDGET }
    }
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// A pacer for `fps` frames per second; `0` disables pacing.
    pub fn from_fps(fps: u32) -> Self {
        match fps {
            0 => Self { budget: Duration::ZERO },
            fps => Self { budget: Duration::from_secs(1) / fps },
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time still to wait if `elapsed` of the budget has been used.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Sleeps until `budget` has passed since `started` and returns the time slept.
    pub fn pace(&self, started: Instant) -> Duration {
        let remaining = self.remaining(started.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        remaining
    }
}
