use std::sync::Arc;

use thiserror::Error;

use crate::playback::domain::player_api::PlayerApiSignal;
use crate::playback::domain::position_poller::{PollGeneration, PositionPoller};
use crate::playback::domain::video_player::{PlayerStateChange, VideoPlayer, VideoPlayerFactory};
use crate::playback::playback_state::PlaybackState;
use crate::shared::constants::{PLAYER_CONTAINER_ID, POSITION_POLL_INTERVAL};
use crate::video::domain::video_identifier::VideoId;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("failed to create player for video {video_id}: {reason}")]
    CreatePlayer { video_id: String, reason: String },
}

/// Lifecycle of the widget for the currently loaded identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    Uninitialized,
    Ready,
    Playing,
    Paused,
}

/// Facts read from the widget when it becomes ready.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedVideo {
    pub title: String,
    pub duration: f64,
}

/// Bridges an embedded video widget's lifecycle to the session.
///
/// Widget construction waits for the process-wide [`PlayerApiSignal`].
/// While playing, a [`PositionPoller`] cycle republishes the position; the
/// cycle is cancelled on pause, on end, on reload and on teardown.
pub struct PlaybackAdapter {
    factory: Box<dyn VideoPlayerFactory>,
    poller: Box<dyn PositionPoller>,
    api: Arc<PlayerApiSignal>,
    player: Option<Box<dyn VideoPlayer>>,
    pending: Option<VideoId>,
    video_id: Option<VideoId>,
    phase: PlaybackPhase,
    poll_generation: Option<PollGeneration>,
    state: PlaybackState,
}

impl PlaybackAdapter {
    pub fn new(
        factory: Box<dyn VideoPlayerFactory>,
        poller: Box<dyn PositionPoller>,
        api: Arc<PlayerApiSignal>,
    ) -> Self {
        Self {
            factory,
            poller,
            api,
            player: None,
            pending: None,
            video_id: None,
            phase: PlaybackPhase::Uninitialized,
            poll_generation: None,
            state: PlaybackState::default(),
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Replaces the current widget with one for `video_id`.
    ///
    /// If the player API is not ready yet, construction is deferred until
    /// [`on_api_ready`](Self::on_api_ready). The new widget is built before
    /// the old one is dropped, so a construction error leaves the adapter
    /// exactly as it was.
    pub fn load(&mut self, video_id: VideoId) -> Result<(), PlaybackError> {
        let player = if self.api.is_ready() {
            Some(self.create_player(&video_id)?)
        } else {
            None
        };

        self.teardown();
        self.state = PlaybackState::default();
        self.video_id = Some(video_id.clone());

        match player {
            Some(player) => self.install(player, &video_id),
            None => {
                log::debug!("Player API not ready, deferring widget construction");
                self.pending = Some(video_id);
            }
        }
        Ok(())
    }

    /// Drops the widget without loading another one.
    pub fn unload(&mut self) {
        self.teardown();
        self.video_id = None;
        self.state = PlaybackState::default();
    }

    /// Handles the process-wide API-ready event.
    pub fn on_api_ready(&mut self) -> Result<(), PlaybackError> {
        self.api.signal();
        self.create_pending()
    }

    fn create_pending(&mut self) -> Result<(), PlaybackError> {
        let Some(video_id) = self.pending.take() else {
            return Ok(());
        };
        let player = self.create_player(&video_id)?;
        self.install(player, &video_id);
        Ok(())
    }

    fn create_player(&mut self, video_id: &VideoId) -> Result<Box<dyn VideoPlayer>, PlaybackError> {
        self.factory
            .create(PLAYER_CONTAINER_ID, video_id)
            .map_err(|e| PlaybackError::CreatePlayer {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })
    }

    fn install(&mut self, player: Box<dyn VideoPlayer>, video_id: &VideoId) {
        log::info!("Player created for video {video_id}");
        self.player = Some(player);
        self.phase = PlaybackPhase::Uninitialized;
    }

    /// Handles the widget's ready notification.
    ///
    /// Returns `None` if there is no widget or it was already ready.
    pub fn on_ready(&mut self) -> Option<LoadedVideo> {
        if self.phase != PlaybackPhase::Uninitialized {
            return None;
        }
        let player = self.player.as_ref()?;
        let loaded = LoadedVideo {
            title: player.title(),
            duration: player.duration(),
        };
        self.state.duration = loaded.duration;
        self.state.position = 0.0;
        self.phase = PlaybackPhase::Ready;
        log::info!(
            "Video ready: \"{}\" ({:.1}s)",
            loaded.title,
            loaded.duration
        );
        Some(loaded)
    }

    pub fn on_state_change(&mut self, change: PlayerStateChange) {
        if self.player.is_none() || self.phase == PlaybackPhase::Uninitialized {
            return;
        }
        match change {
            PlayerStateChange::Playing => {
                self.poll_generation = Some(self.poller.start(POSITION_POLL_INTERVAL));
                self.state.is_playing = true;
                self.phase = PlaybackPhase::Playing;
            }
            PlayerStateChange::Paused | PlayerStateChange::Ended => {
                self.stop_polling();
                if let Some(player) = &self.player {
                    self.state.position = player.current_time();
                }
                self.state.is_playing = false;
                self.phase = PlaybackPhase::Paused;
            }
            PlayerStateChange::Unstarted
            | PlayerStateChange::Buffering
            | PlayerStateChange::Cued => {}
        }
    }

    /// Republishes the position for a tick of the current cycle.
    ///
    /// Ticks from cancelled cycles are ignored and return `None`.
    pub fn on_poll_tick(&mut self, generation: PollGeneration) -> Option<f64> {
        if self.poll_generation != Some(generation) {
            return None;
        }
        let player = self.player.as_ref()?;
        self.state.position = player.current_time();
        Some(self.state.position)
    }

    /// Seeks the widget and reports the new position immediately.
    ///
    /// The target is clamped to `[0, duration]` once a duration is known.
    /// Non-finite targets are ignored.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let seconds = if self.state.has_duration() {
            seconds.clamp(0.0, self.state.duration)
        } else {
            seconds.max(0.0)
        };
        if let Some(player) = self.player.as_mut() {
            player.seek_to(seconds, true);
        }
        self.state.position = seconds;
    }

    /// Overrides duration from an imported document and rewinds.
    pub fn restore(&mut self, duration: f64) {
        self.state.duration = duration;
        self.state.position = 0.0;
    }

    /// Cancels polling and drops the widget.
    pub fn teardown(&mut self) {
        self.stop_polling();
        self.player = None;
        self.pending = None;
        self.state.is_playing = false;
        self.phase = PlaybackPhase::Uninitialized;
    }

    fn stop_polling(&mut self) {
        self.poller.cancel();
        self.poll_generation = None;
    }
}

impl Drop for PlaybackAdapter {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
