//! Core domain types for regional alert tracking.
//!
//! This crate provides the shared vocabulary for every alert tracking crate:
//!
//! - [`Region`] / [`Alert`] - Domain entities decoded from the upstream API
//! - [`RegionAlertStatus`] - A region paired with its alert flag, as handed to observers
//! - [`AlertRepository`] - The capability trait implemented by each backend
//! - [`AlertError`] - Error types shared by repositories and monitors
//!
//! # Example
//!
//! ```rust
//! use alert_core::{AlertError, AlertRepository, Region};
//! use async_trait::async_trait;
//!
//! struct QuietRepository;
//!
//! #[async_trait]
//! impl AlertRepository for QuietRepository {
//!     async fn get_region(&self, name: &str) -> Result<Region, AlertError> {
//!         Region::new("1", name, "State", Vec::new())
//!     }
//!
//!     async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn get_last_action_index(&self) -> Result<i64, AlertError> {
//!         Ok(0)
//!     }
//! }
//! ```

mod error;
mod models;
mod repository;
mod status;

pub use error::{ensure_not_blank, AlertError, DecodeError, ResponseSnapshot};
pub use models::{Alert, Region, SENTINEL_REGION_ID};
pub use repository::AlertRepository;
pub use status::RegionAlertStatus;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
