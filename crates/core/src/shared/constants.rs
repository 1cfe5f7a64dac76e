use std::time::Duration;

/// Cadence at which playback position is republished while playing.
pub const POSITION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Canonical video identifiers are exactly this many characters.
pub const VIDEO_ID_LENGTH: usize = 11;

pub const EXPORT_FILENAME: &str = "youtube-timeline.json";

pub const DEFAULT_DICTATION_LANGUAGE: &str = "en-US";

/// Element id the embedded player is mounted into.
pub const PLAYER_CONTAINER_ID: &str = "youtube-player";
