/// Horizontal placement of the rendered timeline track, in pointer
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Fraction of the track under `client_x`, clamped to `[0, 1]`.
    ///
    /// A track with no width yields 0.
    pub fn fraction_at(&self, client_x: f64) -> f64 {
        if !(self.width.is_finite() && self.width > 0.0) {
            return 0.0;
        }
        let fraction = (client_x - self.left) / self.width;
        if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds under `client_x` for a video of `duration` seconds.
    pub fn time_at(&self, client_x: f64, duration: f64) -> f64 {
        if !(duration.is_finite() && duration > 0.0) {
            return 0.0;
        }
        self.fraction_at(client_x) * duration
    }
}

/// Where the position marker sits along the track, as a percentage.
///
/// Always finite: an unknown (zero) duration places the marker at 0.
pub fn position_percent(position: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !position.is_finite() {
        return 0.0;
    }
    (position / duration * 100.0).clamp(0.0, 100.0)
}
