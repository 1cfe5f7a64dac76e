use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::playback::domain::video_player::{PlayerStateChange, VideoPlayer, VideoPlayerFactory};
use crate::video::domain::video_identifier::VideoId;

#[derive(Debug)]
struct ClockState {
    duration: f64,
    title: String,
    offset: f64,
    started: Option<Instant>,
}

impl ClockState {
    fn now(&self) -> f64 {
        let elapsed = self
            .started
            .map(|s| s.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        (self.offset + elapsed).clamp(0.0, self.duration.max(0.0))
    }

    fn rewind(&mut self) {
        self.offset = 0.0;
        self.started = None;
    }
}

fn lock(state: &Mutex<ClockState>) -> MutexGuard<'_, ClockState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Stand-in widget whose position advances with wall-clock time while
/// playing. Used by hosts that have no real video surface.
pub struct ClockPlayer {
    state: Arc<Mutex<ClockState>>,
}

impl VideoPlayer for ClockPlayer {
    fn duration(&self) -> f64 {
        lock(&self.state).duration
    }

    fn current_time(&self) -> f64 {
        lock(&self.state).now()
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        let mut state = lock(&self.state);
        let max = state.duration.max(0.0);
        state.offset = if seconds.is_finite() { seconds.clamp(0.0, max) } else { 0.0 };
        if state.started.is_some() {
            state.started = Some(Instant::now());
        }
    }

    fn title(&self) -> String {
        lock(&self.state).title.clone()
    }
}

/// Builds [`ClockPlayer`]s that all share one clock. Each construction
/// rewinds it, like loading a fresh widget.
pub struct ClockPlayerFactory {
    state: Arc<Mutex<ClockState>>,
}

impl ClockPlayerFactory {
    pub fn new(duration: f64, title: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                duration,
                title: title.to_string(),
                offset: 0.0,
                started: None,
            })),
        }
    }

    /// Control surface for the clock, standing in for the widget's own
    /// play/pause buttons.
    pub fn remote(&self) -> ClockRemote {
        ClockRemote {
            state: self.state.clone(),
        }
    }
}

impl VideoPlayerFactory for ClockPlayerFactory {
    fn create(
        &mut self,
        _container_id: &str,
        _video_id: &VideoId,
    ) -> Result<Box<dyn VideoPlayer>, Box<dyn std::error::Error>> {
        lock(&self.state).rewind();
        Ok(Box::new(ClockPlayer {
            state: self.state.clone(),
        }))
    }
}

/// Plays and pauses the shared clock. Each call returns the notification
/// the widget would emit.
#[derive(Clone)]
pub struct ClockRemote {
    state: Arc<Mutex<ClockState>>,
}

impl ClockRemote {
    pub fn play(&self) -> PlayerStateChange {
        let mut state = lock(&self.state);
        if state.started.is_none() {
            if state.now() >= state.duration {
                state.offset = 0.0;
            }
            state.started = Some(Instant::now());
        }
        PlayerStateChange::Playing
    }

    pub fn pause(&self) -> PlayerStateChange {
        let mut state = lock(&self.state);
        state.offset = state.now();
        state.started = None;
        PlayerStateChange::Paused
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.state).started.is_some()
    }

    /// Whether a playing clock has run to the end of the media.
    pub fn reached_end(&self) -> bool {
        let state = lock(&self.state);
        state.started.is_some() && state.now() >= state.duration
    }

    /// Swaps the media the next widget will report.
    pub fn set_media(&self, duration: f64, title: &str) {
        let mut state = lock(&self.state);
        state.duration = duration;
        state.title = title.to_string();
        state.rewind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;
    use std::time::Duration;

    fn video_id() -> VideoId {
        VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_reports_media_facts() {
        let mut factory = ClockPlayerFactory::new(212.0, "Song");
        let player = factory.create("youtube-player", &video_id()).unwrap();
        assert_eq!(player.duration(), 212.0);
        assert_eq!(player.title(), "Song");
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_clock_stands_still_while_paused() {
        let mut factory = ClockPlayerFactory::new(212.0, "Song");
        let player = factory.create("youtube-player", &video_id()).unwrap();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_clock_advances_while_playing() {
        let mut factory = ClockPlayerFactory::new(212.0, "Song");
        let remote = factory.remote();
        let player = factory.create("youtube-player", &video_id()).unwrap();

        assert_eq!(remote.play(), PlayerStateChange::Playing);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(remote.pause(), PlayerStateChange::Paused);

        let t = player.current_time();
        assert!(t > 0.0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(player.current_time(), t);
    }

    #[test]
    fn test_seek_is_clamped_to_media() {
        let mut factory = ClockPlayerFactory::new(60.0, "Song");
        let mut player = factory.create("youtube-player", &video_id()).unwrap();
        player.seek_to(30.0, true);
        assert_relative_eq!(player.current_time(), 30.0);
        player.seek_to(500.0, true);
        assert_relative_eq!(player.current_time(), 60.0);
        player.seek_to(-5.0, true);
        assert_relative_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_reaches_end() {
        let mut factory = ClockPlayerFactory::new(0.01, "Short");
        let remote = factory.remote();
        let _player = factory.create("youtube-player", &video_id()).unwrap();
        remote.play();
        thread::sleep(Duration::from_millis(30));
        assert!(remote.reached_end());
    }

    #[test]
    fn test_create_rewinds_shared_clock() {
        let mut factory = ClockPlayerFactory::new(60.0, "Song");
        let mut first = factory.create("youtube-player", &video_id()).unwrap();
        first.seek_to(20.0, true);
        let second = factory.create("youtube-player", &video_id()).unwrap();
        assert_eq!(second.current_time(), 0.0);
    }

    #[test]
    fn test_set_media_changes_reported_facts() {
        let mut factory = ClockPlayerFactory::new(60.0, "Song");
        let remote = factory.remote();
        remote.set_media(90.0, "Other");
        let player = factory.create("youtube-player", &video_id()).unwrap();
        assert_eq!(player.duration(), 90.0);
        assert_eq!(player.title(), "Other");
    }
}
