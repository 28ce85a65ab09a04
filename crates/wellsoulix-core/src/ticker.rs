//! Periodic driver for tick-based widgets

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// State advanced by a fixed-period tick
pub trait Tickable: Send + 'static {
    /// Notification produced by a tick, if any
    type Event: Send + 'static;

    fn tick(&mut self) -> Option<Self::Event>;
}

/// Owns a running ticker task; dropping it stops the task
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Tick `state` every `period` until the handle is dropped.
///
/// The first tick fires one period after spawning. Events are forwarded
/// on the returned channel; a closed receiver does not stop ticking.
pub fn spawn_ticker<T: Tickable>(
    period: Duration,
    state: Arc<Mutex<T>>,
) -> (TickerHandle, mpsc::UnboundedReceiver<T::Event>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let event = state.lock().await.tick();
            if let Some(event) = event {
                if tx.send(event).is_err() {
                    log::debug!("Ticker event receiver closed");
                }
            }
        }
    });

    (TickerHandle { task }, rx)
}
