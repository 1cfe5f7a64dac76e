/// Playback facts mirrored from the video widget.
///
/// Duration is whatever the widget (or an imported document) reports; the
/// application never computes it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub duration: f64,
    pub position: f64,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn has_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }
}
