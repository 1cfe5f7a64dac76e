use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};

use crate::playback::domain::position_poller::{PollGeneration, PollTick, PositionPoller};

struct RunningCycle {
    generation: PollGeneration,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Poller backed by a worker thread per cycle.
///
/// Ticks are sent on the channel handed to [`new`](Self::new); the host
/// drains the matching receiver on its event loop. Cancelling joins the
/// worker, so no timer outlives its cycle. Dropping the poller cancels.
pub struct ThreadedPositionPoller {
    tick_tx: Sender<PollTick>,
    running: Option<RunningCycle>,
    next_generation: u64,
}

impl ThreadedPositionPoller {
    pub fn new(tick_tx: Sender<PollTick>) -> Self {
        Self {
            tick_tx,
            running: None,
            next_generation: 0,
        }
    }

    /// Convenience constructor returning the poller and its tick receiver.
    pub fn with_channel() -> (Self, Receiver<PollTick>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl PositionPoller for ThreadedPositionPoller {
    fn start(&mut self, interval: Duration) -> PollGeneration {
        self.cancel();

        self.next_generation += 1;
        let generation = PollGeneration(self.next_generation);
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let tick_tx = self.tick_tx.clone();

        let handle = std::thread::spawn(move || {
            let ticker = crossbeam_channel::tick(interval);
            loop {
                select! {
                    recv(ticker) -> _ => {
                        if tick_tx.send(PollTick { generation }).is_err() {
                            break;
                        }
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
        });

        log::debug!("Position polling started (cycle {})", generation.0);
        self.running = Some(RunningCycle {
            generation,
            stop_tx,
            handle,
        });
        generation
    }

    fn cancel(&mut self) {
        if let Some(cycle) = self.running.take() {
            drop(cycle.stop_tx);
            if cycle.handle.join().is_err() {
                log::error!("Position polling thread panicked");
            }
            log::debug!("Position polling cancelled (cycle {})", cycle.generation.0);
        }
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for ThreadedPositionPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}
