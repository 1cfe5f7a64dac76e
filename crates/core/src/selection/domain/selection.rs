use serde::{Deserialize, Serialize};

/// The highlighted `[start, end]` range, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub start: f64,
    pub end: f64,
}

impl Selection {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole video.
    pub fn full(duration: f64) -> Self {
        Self::new(0.0, duration.max(0.0))
    }

    /// Clamps both bounds into `[0, duration]` and orders them.
    ///
    /// Non-finite bounds collapse to 0.
    pub fn bounded(a: f64, b: f64, duration: f64) -> Self {
        let max = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, max) } else { 0.0 };
        let (a, b) = (clamp(a), clamp(b));
        Self::new(a.min(b), a.max(b))
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}
