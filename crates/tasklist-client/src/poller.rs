//! Periodic background refresh bound to an owning handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::TaskApi;
use crate::snapshot::{TaskSnapshot, refresh_into};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// The period the loop actually ticks at; tokio intervals reject zero.
fn effective_interval(every: Duration) -> Duration {
    every.max(MIN_INTERVAL)
}

/// Refreshes a [`TaskSnapshot`] on a fixed interval until shut down.
///
/// The first refresh happens immediately. `shutdown()` lets an in-flight
/// refresh finish and then stops; dropping the handle aborts the task.
#[derive(Debug)]
pub struct RefreshPoller {
    stop: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshPoller {
    /// Spawn the refresh task. Must be called inside a tokio runtime.
    pub fn spawn<A>(api: Arc<A>, snapshot: TaskSnapshot, every: Duration) -> Self
    where
        A: TaskApi + 'static,
    {
        let every = effective_interval(every);
        let stop = Arc::new(Notify::new());
        let handle = tokio::spawn(poll_loop(api, snapshot, every, Arc::clone(&stop)));
        tracing::debug!(interval_ms = every.as_millis(), "refresh poller started");
        Self {
            stop,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop polling and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.stop.notify_one();
        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "refresh poller exited abnormally");
            }
        }
        tracing::debug!("refresh poller stopped");
    }
}

impl Drop for RefreshPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll_loop<A: TaskApi>(api: Arc<A>, snapshot: TaskSnapshot, every: Duration, stop: Arc<Notify>) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = stop.notified() => break,
            _ = ticker.tick() => {
                if let Err(error) = refresh_into(api.as_ref(), &snapshot).await {
                    tracing::warn!(%error, "background refresh failed");
                }
            }
        }
    }
}
