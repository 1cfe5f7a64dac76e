use crate::selection::domain::pointer_capture::PointerCapture;
use crate::selection::domain::timeline_geometry::TrackGeometry;

/// An in-progress drag of the position marker.
///
/// Holds the pointer capture for its whole lifetime and releases it on
/// drop, so ending the drag, replacing it, or tearing the session down all
/// remove the listeners.
pub struct MarkerDrag {
    geometry: TrackGeometry,
    duration: f64,
    capture: Box<dyn PointerCapture>,
}

impl MarkerDrag {
    /// Begins a drag over `geometry` for a video of `duration` seconds.
    pub fn begin(
        geometry: TrackGeometry,
        duration: f64,
        mut capture: Box<dyn PointerCapture>,
    ) -> Self {
        capture.install();
        Self {
            geometry,
            duration,
            capture,
        }
    }

    /// Seconds under the pointer.
    pub fn time_at(&self, client_x: f64) -> f64 {
        self.geometry.time_at(client_x, self.duration)
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }
}

impl Drop for MarkerDrag {
    fn drop(&mut self) {
        self.capture.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    pub(crate) struct CaptureLog {
        pub installs: usize,
        pub releases: usize,
    }

    impl CaptureLog {
        pub fn is_installed(&self) -> bool {
            self.installs > self.releases
        }
    }

    pub(crate) struct RecordingCapture {
        pub log: Arc<Mutex<CaptureLog>>,
    }

    impl PointerCapture for RecordingCapture {
        fn install(&mut self) {
            self.log.lock().unwrap().installs += 1;
        }

        fn release(&mut self) {
            self.log.lock().unwrap().releases += 1;
        }
    }

    pub(crate) fn recording_capture() -> (Box<dyn PointerCapture>, Arc<Mutex<CaptureLog>>) {
        let log = Arc::new(Mutex::new(CaptureLog::default()));
        (Box::new(RecordingCapture { log: log.clone() }), log)
    }

    #[test]
    fn test_begin_installs_capture() {
        let (capture, log) = recording_capture();
        let _drag = MarkerDrag::begin(TrackGeometry::new(0.0, 100.0), 60.0, capture);
        assert!(log.lock().unwrap().is_installed());
    }

    #[test]
    fn test_drop_releases_capture_once() {
        let (capture, log) = recording_capture();
        let drag = MarkerDrag::begin(TrackGeometry::new(0.0, 100.0), 60.0, capture);
        drop(drag);
        let log = log.lock().unwrap();
        assert_eq!(log.installs, 1);
        assert_eq!(log.releases, 1);
    }

    #[test]
    fn test_time_at_uses_duration_from_drag_start() {
        let (capture, _log) = recording_capture();
        let drag = MarkerDrag::begin(TrackGeometry::new(10.0, 200.0), 60.0, capture);
        assert_relative_eq!(drag.time_at(110.0), 30.0);
        assert_relative_eq!(drag.time_at(-500.0), 0.0);
        assert_relative_eq!(drag.time_at(5000.0), 60.0);
    }
}
