//! Fake alert repositories for testing.
//!
//! This crate provides in-memory implementations of the `AlertRepository` trait:
//! - `ScriptedRepository` - Replays scripted region and status responses
//! - `FailingRepository` - Fails every query with a request failure
//! - `DelayedRepository` - Wraps another repository with artificial delay
//!
//! For the real API, use the `alert-api` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_repository::{fixtures, AlertRepository, ScriptedRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_repository::AlertError> {
//!     let repository = ScriptedRepository::new()
//!         .then_region(fixtures::quiet_region("14", "Kyiv"))
//!         .then_region(fixtures::alerted_region("14", "Kyiv"));
//!
//!     assert!(!repository.get_region("Kyiv").await?.is_alert());
//!     assert!(repository.get_region("Kyiv").await?.is_alert());
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
pub mod fixtures;
mod scripted;

// Re-export alert-core types for convenience
pub use alert_core::{async_trait, AlertError, AlertRepository, Region};

pub use delayed::DelayedRepository;
pub use failing::FailingRepository;
pub use scripted::ScriptedRepository;
