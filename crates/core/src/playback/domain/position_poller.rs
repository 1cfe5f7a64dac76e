use std::time::Duration;

/// Identifies one polling cycle. Every `start` hands out a new generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollGeneration(pub u64);

/// A tick delivered to the host event loop by a running poller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollTick {
    pub generation: PollGeneration,
}

/// Cancellable recurring task that drives position republishing.
///
/// Owned by the playback adapter. Ticks are not handled by the poller
/// itself; they are delivered to the host, which feeds them back to the
/// adapter from its event loop.
pub trait PositionPoller: Send {
    /// Starts a new cycle ticking every `interval`, cancelling any running one.
    fn start(&mut self, interval: Duration) -> PollGeneration;

    /// Stops the running cycle, if any. Idempotent.
    fn cancel(&mut self);

    fn is_running(&self) -> bool;
}
