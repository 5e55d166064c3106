use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;

/// 60 FPS target frame budget in seconds.
pub const FRAME_BUDGET_60FPS: f64 = 1.0 / 60.0;
/// 30 FPS budget in seconds.
pub const FRAME_BUDGET_30FPS: f64 = 1.0 / 30.0;

/// Wall time of one archived frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTiming {
    /// Frame counter value the frame was captured under.
    pub frame_number: u64,
    /// Elapsed time of the frame root in seconds.
    pub seconds: f64,
}

impl FrameTiming {
    /// Frames per second this frame time would sustain. Zero-length frames
    /// report zero rather than infinity.
    pub fn fps(&self) -> f64 {
        if self.seconds > 0.0 {
            1.0 / self.seconds
        } else {
            0.0
        }
    }

    pub fn cost(&self) -> FrameCost {
        FrameCost::classify(self.seconds)
    }
}

/// Frame budget bucket used to color the frame-time graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameCost {
    /// At or under the 60 FPS budget.
    Good,
    /// Over 60 FPS but at or under the 30 FPS budget.
    Warning,
    /// Over the 30 FPS budget.
    Dropped,
}

impl FrameCost {
    pub fn classify(seconds: f64) -> Self {
        if seconds <= FRAME_BUDGET_60FPS {
            Self::Good
        } else if seconds <= FRAME_BUDGET_30FPS {
            Self::Warning
        } else {
            Self::Dropped
        }
    }

    pub fn theme_token(self) -> ThemeToken {
        match self {
            Self::Good => ThemeToken::FrameGood,
            Self::Warning => ThemeToken::FrameWarning,
            Self::Dropped => ThemeToken::FrameDropped,
        }
    }
}
