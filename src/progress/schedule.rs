/// Steps after the initial frame; the animation emits `STEPS + 1` frames.
pub const STEPS: u32 = 20;

/// Percentage span covered by each loading message.
const MESSAGE_SPAN: f64 = 33.0;

/// One frame of the loading animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub step: u32,
    /// 0.0 to 100.0
    pub percent: f64,
    pub message: Option<&'a str>,
}

/// Frames of the cosmetic loading animation shown before a result.
///
/// Scoring is instantaneous; the schedule only paces perceived work. It is
/// pure so the pacing can be tested without timers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSchedule {
    messages: Vec<String>,
}

impl ProgressSchedule {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn frame(&self, step: u32) -> Frame<'_> {
        let step = step.min(STEPS);
        let percent = step as f64 / STEPS as f64 * 100.0;
        let message = if self.messages.is_empty() {
            None
        } else {
            let index = ((percent / MESSAGE_SPAN).floor() as usize).min(self.messages.len() - 1);
            Some(self.messages[index].as_str())
        };
        Frame {
            step,
            percent,
            message,
        }
    }

    pub fn frames(&self) -> impl Iterator<Item = Frame<'_>> {
        (0..=STEPS).map(move |step| self.frame(step))
    }
}
