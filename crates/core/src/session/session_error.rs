use thiserror::Error;

use crate::playback::playback_adapter::PlaybackError;
use crate::timeline::segment_ledger::LedgerError;
use crate::timeline::snapshot::SnapshotError;

/// Failures reported to the user as a blocking notice.
///
/// The `Display` text is the notice itself. Every failure leaves the
/// session as it was.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please enter a valid YouTube URL.")]
    InvalidVideoLink,
    #[error("Please enter a search term.")]
    EmptyLabel,
    #[error("Invalid timeline file: {0}")]
    InvalidImport(#[source] SnapshotError),
    #[error("No segment at position {index} (there are {len}).")]
    NoSuchSegment { index: usize, len: usize },
    #[error("Could not load the video player: {0}")]
    Playback(#[from] PlaybackError),
}

impl From<LedgerError> for SessionError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::EmptyLabel => SessionError::EmptyLabel,
            LedgerError::IndexOutOfRange { index, len } => SessionError::NoSuchSegment { index, len },
        }
    }
}
