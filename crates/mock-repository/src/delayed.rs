//! Delayed repository - wraps another repository with artificial delay.

use std::time::Duration;

use alert_core::{async_trait, AlertError, AlertRepository, Region};
use tokio::time::sleep;

/// A repository that wraps another repository and adds artificial delay.
///
/// Useful for simulating API latency inside tracking loops.
pub struct DelayedRepository<R: AlertRepository> {
    inner: R,
    delay: Duration,
}

impl<R: AlertRepository> DelayedRepository<R> {
    /// Create a new DelayedRepository wrapping the given repository.
    pub fn new(inner: R, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a repository with a delay in milliseconds.
    pub fn with_millis(inner: R, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get a reference to the wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: AlertRepository> AlertRepository for DelayedRepository<R> {
    async fn get_region(&self, name: &str) -> Result<Region, AlertError> {
        sleep(self.delay).await;
        self.inner.get_region(name).await
    }

    async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError> {
        sleep(self.delay).await;
        self.inner.get_all_regions().await
    }

    async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError> {
        sleep(self.delay).await;
        self.inner.get_regions_with_alert().await
    }

    async fn get_last_action_index(&self) -> Result<i64, AlertError> {
        sleep(self.delay).await;
        self.inner.get_last_action_index().await
    }
}
