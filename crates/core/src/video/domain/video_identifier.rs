use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::shared::constants::VIDEO_ID_LENGTH;

/// Link shapes recognised: `youtu.be/ID`, `v/ID`, `u/<x>/ID`, `embed/ID`,
/// `watch?v=ID` and `&v=ID`. The greedy prefix makes the last marker in the
/// link win; the token runs until `#`, `&` or `?`. The `u/` segment takes a
/// single ASCII word character.
const LINK_PATTERN: &str = r"^.*(youtu.be/|v/|u/(?-u:\w)/|embed/|watch\?v=|&v=)([^#&?]*).*";

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LINK_PATTERN).expect("link pattern is valid"))
}

/// Canonical short token a video link resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts the identifier from a free-form link.
    ///
    /// Returns `None` unless a recognised link shape captures a token of
    /// exactly [`VIDEO_ID_LENGTH`] UTF-16 code units, the length a browser
    /// reports for the same text.
    pub fn parse(link: &str) -> Option<Self> {
        let captures = link_pattern().captures(link)?;
        let token = captures.get(2)?.as_str();
        if token.encode_utf16().count() == VIDEO_ID_LENGTH {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn extract_video_id(link: &str) -> Option<VideoId> {
    VideoId::parse(link)
}
