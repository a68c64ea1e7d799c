//! One-second interval driver.
//!
//! Both the wall-clock display and the countdown are fed by a `Ticker`.
//! The interval task lives exactly as long as its owner: dropping the
//! ticker aborts the task, so nothing keeps ticking after the owning view
//! goes away.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct Ticker {
    rx: mpsc::Receiver<Instant>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking every [`TICK_PERIOD`]. Must be called inside a tokio runtime.
    pub fn start() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(async move {
            let mut iv = interval(period);
            iv.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            iv.tick().await;
            loop {
                let at = iv.tick().await;
                if tx.send(at).await.is_err() {
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    /// Wait for the next tick. Returns `None` once the ticker is cancelled.
    pub async fn next(&mut self) -> Option<Instant> {
        self.rx.recv().await
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
