use crate::dictation::domain::speech_capture::SpeechEvent;
use crate::playback::domain::position_poller::PollGeneration;
use crate::playback::domain::video_player::PlayerStateChange;

/// Every callback the session reacts to.
///
/// Hosts translate their own notifications (widget callbacks, timer ticks,
/// pointer events, speech events, file reads) into these and hand them to
/// [`TimelineSession::dispatch`](super::timeline_session::TimelineSession::dispatch)
/// one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    PlayerApiReady,
    PlayerReady,
    PlayerStateChanged(PlayerStateChange),
    PollTick(PollGeneration),
    PointerMoved { client_x: f64 },
    PointerReleased,
    Speech(SpeechEvent),
    FileRead(String),
}
