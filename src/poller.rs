//! New-event poller
//!
//! Background task that asks the backend for recently created events on a
//! fixed interval and hands each one to the dashboard's presenter. The task
//! lives as long as its [`PollSubscription`]; cancelling or dropping the
//! subscription stops it before the next tick.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::Transport;
use crate::dashboard::Dashboard;
use crate::error::ValidationError;

/// One hour
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3600);

/// Handle to a running poller
pub struct PollSubscription {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PollSubscription {
    /// Stop polling; an in-flight check finishes first
    pub async fn cancel(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Event poller task ended abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PollSubscription {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Start polling for new events every `interval`
///
/// The first check runs one full interval after the call. A zero interval
/// is rejected.
pub fn start<T>(
    dashboard: Dashboard<T>,
    interval: Duration,
) -> Result<PollSubscription, ValidationError>
where
    T: Transport + 'static,
{
    if interval.is_zero() {
        return Err(ValidationError::ZeroPollInterval);
    }

    let (shutdown, mut stop) = watch::channel(false);

    tracing::info!(interval_secs = interval.as_secs(), "Starting event poller");

    // Anchored to the call, not to when the task first gets scheduled
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop.changed() => break,
            }

            tracing::debug!("Checking for new events");
            match dashboard.check_for_new_events().await {
                Ok(count) => {
                    tracing::debug!(count, "Event check completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Event check failed");
                }
            }
        }

        tracing::info!("Event poller stopped");
    });

    Ok(PollSubscription {
        shutdown,
        handle: Some(handle),
    })
}
