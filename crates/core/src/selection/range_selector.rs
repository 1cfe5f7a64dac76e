use crate::selection::domain::pointer_capture::PointerCapture;
use crate::selection::domain::selection::Selection;
use crate::selection::domain::timeline_geometry::{position_percent, TrackGeometry};
use crate::selection::marker_drag::MarkerDrag;

/// Owns the current selection and the position-marker drag.
///
/// Two update paths: dragging the range handles (never seeks) and dragging
/// the position marker (always seeks, handled by the session with the time
/// returned from [`marker_move`](Self::marker_move)).
#[derive(Default)]
pub struct RangeSelector {
    selection: Selection,
    duration: f64,
    marker_drag: Option<MarkerDrag>,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Adopts a new duration and selects the whole video.
    pub fn reset(&mut self, duration: f64) {
        self.duration = duration;
        self.selection = Selection::full(duration);
    }

    /// Range-handle drag: both bounds clamped to `[0, duration]` and ordered.
    pub fn drag_range(&mut self, start: f64, end: f64) -> Selection {
        self.selection = Selection::bounded(start, end, self.duration);
        self.selection
    }

    /// Starts a marker drag, ending any drag still in progress.
    pub fn begin_marker_drag(&mut self, geometry: TrackGeometry, capture: Box<dyn PointerCapture>) {
        self.end_marker_drag();
        self.marker_drag = Some(MarkerDrag::begin(geometry, self.duration, capture));
    }

    /// Seconds under the pointer for the active drag, or `None` if idle.
    pub fn marker_move(&self, client_x: f64) -> Option<f64> {
        self.marker_drag.as_ref().map(|drag| drag.time_at(client_x))
    }

    pub fn end_marker_drag(&mut self) {
        self.marker_drag = None;
    }

    pub fn is_marker_dragging(&self) -> bool {
        self.marker_drag.is_some()
    }

    /// Marker location for `position`, as a percentage of the track.
    pub fn marker_percent(&self, position: f64) -> f64 {
        position_percent(position, self.duration)
    }
}
