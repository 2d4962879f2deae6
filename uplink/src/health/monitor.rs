//! Repeating, cancellable backend-reachability probe.
//!
//! The monitor owns a background task that probes the health endpoint
//! immediately on activation and then on a fixed interval. Exactly one probe
//! is in flight at a time. Every probe is bounded by a timeout that aborts
//! the in-flight request (the request future is dropped, not merely flagged),
//! and deactivation cancels the task through a [`CancellationToken`] — a
//! response arriving after cancellation is never applied to shared state.
//!
//! Status is published through an [`ArcSwap`] so presentation code takes
//! lock-free snapshots. No probe failure is ever surfaced as an error: every
//! failure mode collapses to "down".

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::Utc;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::health::models::{BackendStatus, HealthResponse};

/// Handle to the repeating health probe task.
///
/// Dropping the monitor deactivates it.
pub struct BackendHealthMonitor {
    status: Arc<ArcSwap<BackendStatus>>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl BackendHealthMonitor {
    /// Activate the monitor: one probe immediately, then one per `interval`,
    /// each bounded by `timeout`, until [`stop`](Self::stop) or drop.
    pub fn start(client: Client, endpoint: String, interval: Duration, timeout: Duration) -> Self {
        let status = Arc::new(ArcSwap::from_pointee(BackendStatus::default()));
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run_probe_loop(
            client,
            endpoint,
            interval,
            timeout,
            Arc::clone(&status),
            cancel.clone(),
        ));

        Self { status, cancel, handle }
    }

    /// Snapshot of the latest known backend status.
    pub fn status(&self) -> BackendStatus {
        self.status.load().as_ref().clone()
    }

    /// Shared handle for readers that want to poll the status themselves.
    pub fn status_handle(&self) -> Arc<ArcSwap<BackendStatus>> {
        Arc::clone(&self.status)
    }

    /// Deactivate: cancel the repeating timer and discard any in-flight
    /// probe. Its result, if it ever arrives, is not applied.
    pub fn stop(&self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

impl Drop for BackendHealthMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

async fn run_probe_loop(
    client: Client,
    endpoint: String,
    interval: Duration,
    timeout: Duration,
    status: Arc<ArcSwap<BackendStatus>>,
    cancel: CancellationToken,
) {
    // The first tick fires immediately, giving the activation probe.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Backend health monitor started for {endpoint} (every {interval:?}, timeout {timeout:?})");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let is_up = tokio::select! {
            // Cancellation drops the probe future, aborting the request; its
            // result can never race into shared state.
            _ = cancel.cancelled() => break,
            is_up = probe_once(&client, &endpoint, timeout) => is_up,
        };

        if cancel.is_cancelled() {
            break;
        }

        let was_up = status.load().is_up;
        status.store(Arc::new(BackendStatus {
            is_up,
            last_checked: Some(Utc::now()),
        }));

        if was_up != is_up {
            if is_up {
                tracing::info!("Backend is reachable again");
            } else {
                tracing::warn!("Backend is unreachable");
            }
        } else {
            tracing::debug!(is_up, "Health probe resolved");
        }
    }

    tracing::debug!("Backend health monitor stopped");
}

/// One bounded reachability probe. Every failure mode — timeout, network
/// error, non-2xx, malformed body, status other than "healthy" — resolves
/// `false`.
async fn probe_once(client: &Client, endpoint: &str, timeout: Duration) -> bool {
    // The per-request timeout covers connect through body completion and
    // aborts the request on expiry.
    let response = match client.get(endpoint).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            tracing::debug!("Health probe timed out after {timeout:?}");
            return false;
        }
        Err(e) => {
            tracing::debug!("Health probe transport error: {e}");
            return false;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Health probe got HTTP {}", response.status());
        return false;
    }

    match response.json::<HealthResponse>().await {
        Ok(body) => {
            if !body.is_healthy()
                && let Some(message) = &body.message
            {
                tracing::debug!("Health endpoint reported {:?}: {message}", body.status);
            }
            body.is_healthy()
        }
        Err(e) => {
            tracing::debug!("Health probe body was malformed: {e}");
            false
        }
    }
}
