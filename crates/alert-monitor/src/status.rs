//! Status updates monitor - watches the API-wide last action index.

use std::sync::Arc;
use std::time::Duration;

use alert_core::{AlertError, AlertRepository};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::{Observers, StatusUpdated};
use crate::wait::{ensure_interval, wait_or_cancel};

/// Detects changes of the last action index and raises [`StatusUpdated`].
///
/// The remembered index starts at `0`, so the first check against a live API
/// normally reports an update.
pub struct StatusUpdatesMonitor {
    repository: Arc<dyn AlertRepository>,
    last_action_index: i64,
    observers: Observers<StatusUpdated>,
}

impl StatusUpdatesMonitor {
    pub fn new(repository: Arc<dyn AlertRepository>) -> Self {
        Self {
            repository,
            last_action_index: 0,
            observers: Observers::new(),
        }
    }

    /// Register an observer for status updates.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&StatusUpdated) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    /// Register a channel observer and return its receiving end.
    pub fn events(&mut self) -> mpsc::UnboundedReceiver<StatusUpdated> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(move |event| {
            let _ = tx.send(*event);
        });
        rx
    }

    /// The index seen by the most recent check.
    pub fn last_action_index(&self) -> i64 {
        self.last_action_index
    }

    /// Fetch the index once. Returns `true` and notifies observers if it changed.
    ///
    /// Observers run before the remembered index is replaced.
    pub async fn check_status_updated(&mut self) -> Result<bool, AlertError> {
        let index = self.repository.get_last_action_index().await?;
        debug!(index, previous = self.last_action_index, "Last action index checked");

        if index == self.last_action_index {
            return Ok(false);
        }

        self.observers.notify(&StatusUpdated);
        self.last_action_index = index;
        Ok(true)
    }

    /// Check the index every `interval` until `token` is cancelled.
    pub async fn start_tracking(
        &mut self,
        interval: Duration,
        token: CancellationToken,
    ) -> Result<(), AlertError> {
        ensure_interval(interval)?;

        info!(interval = ?interval, "Starting status updates tracking");

        while !token.is_cancelled() {
            if self.check_status_updated().await? {
                info!(index = self.last_action_index, "Alert status updated");
            }

            if !wait_or_cancel(interval, &token).await {
                break;
            }
        }

        info!("Status updates tracking stopped");
        Ok(())
    }
}

/// Returns a monitor sharing the repository with index `0` and no observers.
impl Clone for StatusUpdatesMonitor {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.repository))
    }
}

impl std::fmt::Debug for StatusUpdatesMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusUpdatesMonitor")
            .field("last_action_index", &self.last_action_index)
            .field("observers", &self.observers.len())
            .finish()
    }
}
