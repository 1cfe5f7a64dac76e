use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// One-shot, process-wide "player API loaded" event.
///
/// The embedding API becomes usable at some point after startup; widgets
/// cannot be constructed before that. Hosts call [`signal`](Self::signal)
/// once the API is available and the playback adapter checks it before
/// constructing a widget.
#[derive(Debug, Default)]
pub struct PlayerApiSignal {
    ready: Mutex<bool>,
    changed: Condvar,
}

impl PlayerApiSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Marks the API as ready. Returns `true` only for the first call.
    pub fn signal(&self) -> bool {
        let mut ready = self.ready.lock().unwrap_or_else(|e| e.into_inner());
        if *ready {
            return false;
        }
        *ready = true;
        self.changed.notify_all();
        true
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks until signalled or until `timeout` elapses. Returns readiness.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let ready = self.ready.lock().unwrap_or_else(|e| e.into_inner());
        let (ready, _) = self
            .changed
            .wait_timeout_while(ready, timeout, |ready| !*ready)
            .unwrap_or_else(|e| e.into_inner());
        *ready
    }
}
