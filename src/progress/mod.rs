pub mod counter;
pub mod schedule;

pub use counter::{counter_values, run_counter};
pub use schedule::{Frame, ProgressSchedule, STEPS};

use std::time::Duration;

/// Pacing of the loading animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    /// Delay after each frame
    pub step_delay: Duration,
    /// Pause after the last frame, before the result is shown
    pub final_pause: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(50),
            final_pause: Duration::from_millis(500),
        }
    }
}

impl AnimationTiming {
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            final_pause: Duration::ZERO,
        }
    }

    /// Wall time of a full run.
    pub fn total(&self) -> Duration {
        self.step_delay * (STEPS + 1) + self.final_pause
    }
}

/// Play the schedule, handing every frame to `on_frame`.
pub async fn run_animation<F>(schedule: &ProgressSchedule, timing: AnimationTiming, mut on_frame: F)
where
    F: FnMut(Frame<'_>),
{
    for frame in schedule.frames() {
        on_frame(frame);
        if !timing.step_delay.is_zero() {
            tokio::time::sleep(timing.step_delay).await;
        }
    }
    if !timing.final_pause.is_zero() {
        tokio::time::sleep(timing.final_pause).await;
    }
}
