use crate::dictation::domain::speech_capture::{SpeechCapture, SpeechCaptureFactory};

/// Factory for hosts without any speech capability.
#[derive(Debug, Default)]
pub struct UnsupportedSpeechCapture;

impl SpeechCaptureFactory for UnsupportedSpeechCapture {
    fn create(&self) -> Option<Box<dyn SpeechCapture>> {
        None
    }
}
