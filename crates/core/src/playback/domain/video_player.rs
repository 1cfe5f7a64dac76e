use crate::video::domain::video_identifier::VideoId;

/// An embedded video widget, treated as a black box.
///
/// Implementations wrap whatever actually renders and plays the video;
/// the adapter only reads duration, position and title, and requests seeks.
pub trait VideoPlayer: Send {
    /// Total length in seconds. Zero until the widget knows it.
    fn duration(&self) -> f64;

    fn current_time(&self) -> f64;

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    fn title(&self) -> String;
}

/// Constructs a widget for a video inside the given container.
pub trait VideoPlayerFactory: Send {
    fn create(
        &mut self,
        container_id: &str,
        video_id: &VideoId,
    ) -> Result<Box<dyn VideoPlayer>, Box<dyn std::error::Error>>;
}

/// State-change notifications emitted by the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStateChange {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}
