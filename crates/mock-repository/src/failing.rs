//! Failing repository - every query fails with a request failure.

use std::sync::atomic::{AtomicUsize, Ordering};

use alert_core::{async_trait, AlertError, AlertRepository, Region};

/// A repository whose queries always fail.
///
/// Useful for testing that failures propagate out of tracking loops.
#[derive(Debug, Default)]
pub struct FailingRepository {
    status: Option<u16>,
    calls: AtomicUsize,
}

impl FailingRepository {
    /// Fail with a transport error (no HTTP status).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with the given HTTP status.
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, AlertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AlertError::Request {
            status: self.status,
            message: "alert API unavailable".to_string(),
        })
    }
}

#[async_trait]
impl AlertRepository for FailingRepository {
    async fn get_region(&self, _name: &str) -> Result<Region, AlertError> {
        self.fail()
    }

    async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError> {
        self.fail()
    }

    async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError> {
        self.fail()
    }

    async fn get_last_action_index(&self) -> Result<i64, AlertError> {
        self.fail()
    }
}
