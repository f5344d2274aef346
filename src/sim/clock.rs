//! Host timestamp to frame delta

use crate::consts::FIRST_FRAME_DT;

/// Converts wall-clock timestamps (seconds) into per-frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call; the first call yields 1/60 s
    pub fn delta(&mut self, now_secs: f64) -> f32 {
        match self.last.replace(now_secs) {
            None => FIRST_FRAME_DT,
            Some(prev) => (now_secs - prev).max(0.0) as f32,
        }
    }
}
