use crate::dictation::domain::speech_capture::{
    CaptureConfig, SpeechCapture, SpeechCaptureFactory, SpeechEvent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictationPhase {
    Idle,
    Listening,
}

/// Push-to-toggle voice capture producing query text.
///
/// At most one capture session exists; activating while listening stops it.
/// Missing capability and runtime errors are logged, never raised.
pub struct DictationAdapter {
    factory: Box<dyn SpeechCaptureFactory>,
    language: String,
    session: Option<Box<dyn SpeechCapture>>,
}

impl DictationAdapter {
    pub fn new(factory: Box<dyn SpeechCaptureFactory>, language: &str) -> Self {
        Self {
            factory,
            language: language.to_string(),
            session: None,
        }
    }

    pub fn phase(&self) -> DictationPhase {
        if self.session.is_some() {
            DictationPhase::Listening
        } else {
            DictationPhase::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Starts a session when idle, stops the active one otherwise.
    pub fn toggle(&mut self) -> DictationPhase {
        if let Some(mut session) = self.session.take() {
            session.stop();
            log::debug!("Speech recognition stopped");
            return DictationPhase::Idle;
        }

        let Some(mut session) = self.factory.create() else {
            log::error!("Speech recognition not supported in this environment");
            return DictationPhase::Idle;
        };

        session.configure(&CaptureConfig::final_only(&self.language));
        match session.start() {
            Ok(()) => {
                log::debug!("Speech recognition started ({})", self.language);
                self.session = Some(session);
                DictationPhase::Listening
            }
            Err(e) => {
                log::error!("Speech recognition failed to start: {e}");
                DictationPhase::Idle
            }
        }
    }

    /// Handles a notification from the capture session.
    ///
    /// Returns the transcript that should replace the query text, if any.
    pub fn handle_event(&mut self, event: SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Result(results) => {
                let transcript = results
                    .into_iter()
                    .find(|r| r.is_final)
                    .and_then(|r| r.alternatives.into_iter().next());
                if let Some(text) = &transcript {
                    log::debug!("Transcript: {text}");
                }
                transcript
            }
            SpeechEvent::Error(message) => {
                log::error!("Speech recognition error: {message}");
                self.session = None;
                None
            }
            SpeechEvent::End => {
                log::debug!("Speech recognition ended");
                self.session = None;
                None
            }
        }
    }

    /// Stops any active session.
    pub fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }
}

impl Drop for DictationAdapter {
    fn drop(&mut self) {
        self.teardown();
    }
}
