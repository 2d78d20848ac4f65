//! Public alert API client library.
//!
//! This crate provides the HTTP-backed [`AlertRepository`](alert_core::AlertRepository)
//! for the public alert API. It supports:
//!
//! - Fetching a single region, all regions, or the regions with active alerts
//! - Fetching the API-wide last action index
//! - Loading endpoints, region ids and the authorization token from the environment
//!
//! # Example
//!
//! ```no_run
//! use alert_api::{AlertApiRepository, ApiConfig};
//! use alert_core::AlertRepository;
//!
//! # async fn example() -> Result<(), alert_core::AlertError> {
//! let config = ApiConfig::from_env()?;
//! let repository = AlertApiRepository::connect(config)?;
//!
//! let region = repository.get_region("Kyiv").await?;
//! println!("{} alerting: {}", region.name(), region.is_alert());
//!
//! let index = repository.get_last_action_index().await?;
//! println!("Last action index: {}", index);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod deserializer;
pub mod repository;
pub mod request;
pub mod sender;

pub use config::{ApiConfig, ConfigurationProvider, Endpoints};
pub use repository::AlertApiRepository;
pub use request::ApiRequestProvider;
pub use sender::{ApiResponse, HttpSender, ReqwestSender};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
