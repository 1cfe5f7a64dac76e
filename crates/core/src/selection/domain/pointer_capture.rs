/// Document-level pointer listeners held for the duration of a marker drag.
///
/// `install` is called when the drag begins and `release` exactly once when
/// it ends, whichever way it ends.
pub trait PointerCapture: Send {
    fn install(&mut self);

    fn release(&mut self);
}

/// Capture for hosts that deliver pointer events without registration.
#[derive(Debug, Default)]
pub struct NoopPointerCapture;

impl PointerCapture for NoopPointerCapture {
    fn install(&mut self) {}
    fn release(&mut self) {}
}
