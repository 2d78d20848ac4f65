//! Alert Monitor - polling monitors for the alert API.
//!
//! Two monitors sit on top of an [`AlertRepository`](alert_core::AlertRepository):
//!
//! - [`RegionAlertMonitor`] answers snapshot queries and tracks one region,
//!   raising `Checked` on every poll and `Changed` whenever alert presence flips.
//! - [`StatusUpdatesMonitor`] watches the API-wide last action index and raises
//!   [`StatusUpdated`] when it moves.
//!
//! Tracking loops run until their `CancellationToken` is cancelled. Cancellation
//! returns `Ok(())`; repository failures end the loop with the error.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use alert_monitor::{CancellationToken, RegionAlertEvent, RegionAlertMonitor};
//! use mock_repository::{fixtures, ScriptedRepository};
//!
//! # async fn example() -> Result<(), alert_core::AlertError> {
//! let repository = ScriptedRepository::new().then_region(fixtures::alerted_region("14", "Kyiv"));
//! let mut monitor = RegionAlertMonitor::new(Arc::new(repository));
//!
//! monitor.subscribe(|event| {
//!     if let RegionAlertEvent::Changed(status) = event {
//!         println!("{} alert: {}", status.region_name, status.is_alert);
//!     }
//! });
//!
//! let token = CancellationToken::new();
//! monitor.start_tracking("Kyiv", Duration::from_secs(5), token).await?;
//! # Ok(())
//! # }
//! ```

mod events;
mod region;
mod status;
mod wait;

pub use events::{Observer, RegionAlertEvent, StatusUpdated};
pub use region::RegionAlertMonitor;
pub use status::StatusUpdatesMonitor;
pub use tokio_util::sync::CancellationToken;
