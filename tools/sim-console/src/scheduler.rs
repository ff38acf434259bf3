//! Periodic refresh ticks.
//!
//! The scheduler only announces that a period elapsed. Whether anything is
//! reloaded is up to the receiver, which checks the active view.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// One elapsed refresh period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTick;

/// Handle to the background tick task. Dropping it stops the ticks.
#[derive(Debug)]
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Start ticking every `period`; the first tick arrives after one period.
    pub fn start(period: Duration, ticks: mpsc::Sender<RefreshTick>) -> Self {
        debug!(period_secs = period.as_secs_f64(), "starting refresh scheduler");

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!("refresh tick");
                if ticks.send(RefreshTick).await.is_err() {
                    debug!("refresh receiver closed, stopping scheduler");
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
