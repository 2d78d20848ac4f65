//! The AlertRepository trait definition.

use async_trait::async_trait;

use crate::error::AlertError;
use crate::models::Region;

/// Domain-level queries against an alert backend.
///
/// Implementations range from the HTTP-backed API repository to in-memory
/// fakes. This trait is object-safe and can be shared as `Arc<dyn AlertRepository>`.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Fetch a single region by its configured name.
    ///
    /// Fails with [`AlertError::InvalidArgument`] if `name` is empty or whitespace.
    async fn get_region(&self, name: &str) -> Result<Region, AlertError>;

    /// Fetch every known region, without the API's test region.
    async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError>;

    /// Fetch the regions that currently have active alerts.
    async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError>;

    /// Fetch the API-wide last action index.
    async fn get_last_action_index(&self) -> Result<i64, AlertError>;
}
