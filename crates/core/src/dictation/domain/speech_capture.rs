/// Settings applied to a capture session before it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    pub language: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl CaptureConfig {
    /// Continuous listening reporting final results only.
    pub fn final_only(language: &str) -> Self {
        Self {
            language: language.to_string(),
            continuous: true,
            interim_results: false,
        }
    }
}

/// One recognition result: candidate transcripts, best first.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionResult {
    pub alternatives: Vec<String>,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn final_result(transcript: &str) -> Self {
        Self {
            alternatives: vec![transcript.to_string()],
            is_final: true,
        }
    }
}

/// Notifications from a running capture session.
#[derive(Clone, Debug, PartialEq)]
pub enum SpeechEvent {
    Result(Vec<RecognitionResult>),
    Error(String),
    /// The session stopped, whether asked to, after an error, or because the
    /// capability detected the end of speech.
    End,
}

/// A speech-to-text session provided by the host environment.
pub trait SpeechCapture: Send {
    fn configure(&mut self, config: &CaptureConfig);

    fn start(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn stop(&mut self);
}

/// Creates capture sessions. Returns `None` when the host has no speech
/// capability at all.
pub trait SpeechCaptureFactory: Send {
    fn create(&self) -> Option<Box<dyn SpeechCapture>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_only_config() {
        let config = CaptureConfig::final_only("en-US");
        assert_eq!(config.language, "en-US");
        assert!(config.continuous);
        assert!(!config.interim_results);
    }

    #[test]
    fn test_final_result_has_single_alternative() {
        let result = RecognitionResult::final_result("hello");
        assert_eq!(result.alternatives, vec!["hello".to_string()]);
        assert!(result.is_final);
    }
}
