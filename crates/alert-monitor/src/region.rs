//! Region alert monitor - tracks one region's alert status over time.

use std::sync::Arc;
use std::time::Duration;

use alert_core::{ensure_not_blank, AlertError, AlertRepository, Region, RegionAlertStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::{Observers, RegionAlertEvent};
use crate::wait::{ensure_interval, wait_or_cancel};

/// Polls a single region and raises checked/changed notifications.
///
/// The monitor remembers whether the tracked region was alerting. That flag
/// starts as `false` and persists across `start_tracking` calls on the same
/// instance. Use [`Clone`] to get an independent tracker that shares the
/// repository.
pub struct RegionAlertMonitor {
    repository: Arc<dyn AlertRepository>,
    is_alert: bool,
    observers: Observers<RegionAlertEvent>,
}

impl RegionAlertMonitor {
    /// Create a new monitor bound to a repository.
    pub fn new(repository: Arc<dyn AlertRepository>) -> Self {
        Self {
            repository,
            is_alert: false,
            observers: Observers::new(),
        }
    }

    /// Register an observer for checked and changed notifications.
    ///
    /// Observers run synchronously inside the tracking loop, in registration order.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&RegionAlertEvent) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    /// Register a channel observer and return its receiving end.
    pub fn events(&mut self) -> mpsc::UnboundedReceiver<RegionAlertEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Alert status of every known region.
    ///
    /// Each region from the all-regions query is replaced by its counterpart
    /// from the alerted-regions query (matched by name) when one exists.
    pub async fn get_all_regions_alert_status(&self) -> Result<Vec<RegionAlertStatus>, AlertError> {
        let (all_regions, regions_with_alerts) = tokio::try_join!(
            self.repository.get_all_regions(),
            self.repository.get_regions_with_alert()
        )?;

        Ok(all_regions
            .into_iter()
            .map(|region| {
                let region = regions_with_alerts
                    .iter()
                    .find(|alerted| alerted.name() == region.name())
                    .cloned()
                    .unwrap_or(region);
                RegionAlertStatus::from_region(region)
            })
            .collect())
    }

    /// Regions that currently have active alerts.
    pub async fn get_regions_with_alerts(&self) -> Result<Vec<RegionAlertStatus>, AlertError> {
        let regions = self.repository.get_regions_with_alert().await?;
        Ok(regions
            .into_iter()
            .map(|region| RegionAlertStatus::new(region, true))
            .collect())
    }

    /// Whether the named region currently has active alerts.
    pub async fn get_region_alert_status(&self, region_name: &str) -> Result<bool, AlertError> {
        ensure_not_blank("region_name", region_name)?;
        let region = self.repository.get_region(region_name).await?;
        Ok(region.is_alert())
    }

    /// Whether the region currently has active alerts, resolved by its name.
    pub async fn get_region_alert_status_for(&self, region: &Region) -> Result<bool, AlertError> {
        self.get_region_alert_status(region.name()).await
    }

    /// Track the named region until `token` is cancelled.
    ///
    /// Each iteration fetches the region, raises `Checked` with the flag
    /// remembered so far, and raises `Changed` with the new flag if alert
    /// presence differs from it. Cancellation ends the loop with `Ok(())`;
    /// any other failure ends it with that error.
    pub async fn start_tracking(
        &mut self,
        region_name: &str,
        interval: Duration,
        token: CancellationToken,
    ) -> Result<(), AlertError> {
        ensure_not_blank("region_name", region_name)?;
        ensure_interval(interval)?;

        info!(
            region = region_name,
            interval = ?interval,
            observers = self.observers.len(),
            "Starting region alert tracking"
        );

        while !token.is_cancelled() {
            let region = self.repository.get_region(region_name).await?;
            debug!(region = region_name, alerts = region.active_alerts().len(), "Region checked");

            self.observers.notify(&RegionAlertEvent::Checked(RegionAlertStatus::new(
                region.clone(),
                self.is_alert,
            )));

            if region.is_alert() != self.is_alert {
                self.is_alert = !self.is_alert;
                info!(region = region_name, is_alert = self.is_alert, "Region alert status changed");

                self.observers.notify(&RegionAlertEvent::Changed(RegionAlertStatus::new(
                    region,
                    self.is_alert,
                )));
            }

            if !wait_or_cancel(interval, &token).await {
                break;
            }
        }

        info!(region = region_name, "Region alert tracking stopped");
        Ok(())
    }

    /// Track the given region, resolved by its name.
    pub async fn start_tracking_region(
        &mut self,
        region: &Region,
        interval: Duration,
        token: CancellationToken,
    ) -> Result<(), AlertError> {
        self.start_tracking(region.name(), interval, token).await
    }
}

/// Returns a monitor sharing the repository with a fresh alert flag and no observers.
impl Clone for RegionAlertMonitor {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.repository))
    }
}

impl std::fmt::Debug for RegionAlertMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionAlertMonitor")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mock_repository::fixtures::{alerted_region, quiet_region};
    use mock_repository::{DelayedRepository, FailingRepository, ScriptedRepository};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(10);

    /// Cancel `token` once `limit` checked events have been observed.
    fn cancel_after_checks(monitor: &mut RegionAlertMonitor, token: &CancellationToken, limit: usize) {
        let checks = AtomicUsize::new(0);
        let token = token.clone();
        monitor.subscribe(move |event| {
            if event.is_checked() && checks.fetch_add(1, Ordering::SeqCst) + 1 == limit {
                token.cancel();
            }
        });
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<RegionAlertEvent>) -> Vec<RegionAlertEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    ////////////////////////////////////////////////////////////
    // snapshot queries
    ////////////////////////////////////////////////////////////

    #[tokio::test]
    async fn test_get_region_alert_status() {
        let repo = ScriptedRepository::new()
            .then_region(alerted_region("14", "Kyiv"))
            .then_region(quiet_region("14", "Kyiv"));
        let monitor = RegionAlertMonitor::new(Arc::new(repo));

        assert!(monitor.get_region_alert_status("Kyiv").await.unwrap());
        assert!(!monitor.get_region_alert_status("Kyiv").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_region_alert_status_for_region() {
        let repo = ScriptedRepository::new().then_region(alerted_region("14", "Kyiv"));
        let monitor = RegionAlertMonitor::new(Arc::new(repo));

        let region = quiet_region("14", "Kyiv");
        assert!(monitor.get_region_alert_status_for(&region).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_region_alert_status_blank_name() {
        let repo = Arc::new(ScriptedRepository::new());
        let monitor = RegionAlertMonitor::new(repo.clone());

        let err = monitor.get_region_alert_status(" ").await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(repo.region_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_all_regions_alert_status_substitutes_alerted() {
        let repo = ScriptedRepository::new()
            .with_all_regions(vec![
                quiet_region("14", "Kyiv"),
                quiet_region("27", "Lviv"),
                quiet_region("18", "Odesa"),
            ])
            .with_regions_with_alert(vec![alerted_region("27", "Lviv")]);
        let monitor = RegionAlertMonitor::new(Arc::new(repo));

        let statuses = monitor.get_all_regions_alert_status().await.unwrap();

        let names: Vec<&str> = statuses.iter().map(|s| s.region_name.as_str()).collect();
        assert_eq!(names, vec!["Kyiv", "Lviv", "Odesa"]);

        let flags: Vec<bool> = statuses.iter().map(|s| s.is_alert).collect();
        assert_eq!(flags, vec![false, true, false]);

        let lviv = statuses[1].region.as_ref().unwrap();
        assert_eq!(lviv.active_alerts().len(), 1);
        assert!(statuses[0].region.as_ref().unwrap().active_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_regions_alert_status_ignores_unknown_alerted() {
        let repo = ScriptedRepository::new()
            .with_all_regions(vec![quiet_region("14", "Kyiv")])
            .with_regions_with_alert(vec![alerted_region("99", "Elsewhere")]);
        let monitor = RegionAlertMonitor::new(Arc::new(repo));

        let statuses = monitor.get_all_regions_alert_status().await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert!(!statuses[0].is_alert);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_all_regions_alert_status_queries_concurrently() {
        let inner = ScriptedRepository::new()
            .with_all_regions(vec![quiet_region("14", "Kyiv")])
            .with_regions_with_alert(vec![alerted_region("14", "Kyiv")]);
        let repo = Arc::new(DelayedRepository::with_millis(inner, 200));
        let monitor = RegionAlertMonitor::new(repo.clone());

        let start = tokio::time::Instant::now();
        let statuses = monitor.get_all_regions_alert_status().await.unwrap();

        // Both queries sleep on the paused clock, so sequential calls would take 400ms.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(400));
        assert!(statuses[0].is_alert);
        assert_eq!(repo.inner().collection_calls(), 2);
    }

    #[tokio::test]
    async fn test_get_all_regions_alert_status_failure() {
        let monitor = RegionAlertMonitor::new(Arc::new(FailingRepository::with_status(500)));
        let err = monitor.get_all_regions_alert_status().await.unwrap_err();
        assert!(err.is_request());
    }

    #[tokio::test]
    async fn test_get_regions_with_alerts() {
        let repo = ScriptedRepository::new()
            .with_regions_with_alert(vec![alerted_region("27", "Lviv")]);
        let monitor = RegionAlertMonitor::new(Arc::new(repo));

        let statuses = monitor.get_regions_with_alerts().await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].region_name, "Lviv");
        assert!(statuses[0].is_alert);
    }

    ////////////////////////////////////////////////////////////
    // tracking validation
    ////////////////////////////////////////////////////////////

    #[tokio::test]
    async fn test_tracking_zero_interval_out_of_range() {
        let repo = Arc::new(ScriptedRepository::new().then_region(quiet_region("14", "Kyiv")));
        let mut monitor = RegionAlertMonitor::new(repo.clone());

        let err = monitor
            .start_tracking("Kyiv", Duration::ZERO, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_out_of_range());
        assert_eq!(repo.region_calls(), 0);
    }

    #[tokio::test]
    async fn test_tracking_blank_name_invalid_argument() {
        for name in ["", "   ", "\t"] {
            let repo = Arc::new(ScriptedRepository::new().then_region(quiet_region("14", "Kyiv")));
            let mut monitor = RegionAlertMonitor::new(repo.clone());

            let err = monitor
                .start_tracking(name, INTERVAL, CancellationToken::new())
                .await
                .unwrap_err();

            assert!(err.is_invalid_argument());
            assert_eq!(repo.region_calls(), 0);
        }
    }

    ////////////////////////////////////////////////////////////
    // tracking loop
    ////////////////////////////////////////////////////////////

    #[tokio::test]
    async fn test_tracking_raises_changed_on_each_flip() {
        let repo = ScriptedRepository::new()
            .then_region(quiet_region("14", "Kyiv"))
            .then_region(alerted_region("14", "Kyiv"))
            .then_region(quiet_region("14", "Kyiv"));
        let mut monitor = RegionAlertMonitor::new(Arc::new(repo));
        let mut rx = monitor.events();
        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 3);

        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let events = drain(&mut rx);
        let kinds: Vec<(&str, bool)> = events
            .iter()
            .map(|e| (if e.is_checked() { "checked" } else { "changed" }, e.status().is_alert))
            .collect();

        // Checked carries the flag remembered before the poll.
        assert_eq!(
            kinds,
            vec![
                ("checked", false),
                ("checked", false),
                ("changed", true),
                ("checked", true),
                ("changed", false),
            ]
        );
    }

    #[tokio::test]
    async fn test_tracking_quiet_region_never_changes() {
        let repo = ScriptedRepository::new().then_region(quiet_region("14", "Kyiv"));
        let mut monitor = RegionAlertMonitor::new(Arc::new(repo));
        let mut rx = monitor.events();
        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 4);

        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.is_checked()));
    }

    #[tokio::test]
    async fn test_tracking_events_carry_region_payload() {
        let repo = ScriptedRepository::new().then_region(alerted_region("14", "Kyiv"));
        let mut monitor = RegionAlertMonitor::new(Arc::new(repo));
        let mut rx = monitor.events();
        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 1);

        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        let changed = events[1].status();
        assert_eq!(changed.region_id, "14");
        assert_eq!(changed.region_name, "Kyiv");
        assert_eq!(changed.region.as_ref().unwrap().active_alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_tracking_cancelled_during_wait() {
        let repo = Arc::new(ScriptedRepository::new().then_region(quiet_region("14", "Kyiv")));
        let mut monitor = RegionAlertMonitor::new(repo.clone());
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            monitor.start_tracking("Kyiv", Duration::from_secs(60), token),
        )
        .await
        .expect("tracking should stop promptly after cancellation");

        assert!(result.is_ok());
        assert_eq!(repo.region_calls(), 1);
    }

    #[tokio::test]
    async fn test_tracking_already_cancelled_does_nothing() {
        let repo = Arc::new(ScriptedRepository::new().then_region(quiet_region("14", "Kyiv")));
        let mut monitor = RegionAlertMonitor::new(repo.clone());
        let token = CancellationToken::new();
        token.cancel();

        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();
        assert_eq!(repo.region_calls(), 0);
    }

    #[tokio::test]
    async fn test_tracking_propagates_request_failure() {
        let repo = Arc::new(FailingRepository::with_status(503));
        let mut monitor = RegionAlertMonitor::new(repo.clone());
        let mut rx = monitor.events();

        let err = monitor
            .start_tracking("Kyiv", INTERVAL, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AlertError::Request { status: Some(503), .. }));
        assert!(drain(&mut rx).is_empty());
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_tracking_failure_after_successful_polls() {
        let repo = ScriptedRepository::new()
            .then_region(quiet_region("14", "Kyiv"))
            .then_region_failure(None);
        let mut monitor = RegionAlertMonitor::new(Arc::new(repo));
        let mut rx = monitor.events();

        let err = monitor
            .start_tracking("Kyiv", INTERVAL, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_request());
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test]
    async fn test_tracking_state_persists_across_calls() {
        let repo = ScriptedRepository::new().then_region(alerted_region("14", "Kyiv"));
        let mut monitor = RegionAlertMonitor::new(Arc::new(repo));
        let mut rx = monitor.events();

        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 1);
        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();
        assert_eq!(drain(&mut rx).len(), 2);

        // The earlier observer already fired its cancellation; a new token
        // needs its own limit.
        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 1);
        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_checked());
        assert!(events[0].status().is_alert);
    }

    ////////////////////////////////////////////////////////////
    // clone
    ////////////////////////////////////////////////////////////

    #[tokio::test]
    async fn test_clone_resets_alert_flag() {
        let repo = Arc::new(ScriptedRepository::new().then_region(alerted_region("14", "Kyiv")));
        let mut monitor = RegionAlertMonitor::new(repo.clone());

        let token = CancellationToken::new();
        cancel_after_checks(&mut monitor, &token, 1);
        monitor.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let mut fresh = monitor.clone();
        let mut rx = fresh.events();
        let token = CancellationToken::new();
        cancel_after_checks(&mut fresh, &token, 1);
        fresh.start_tracking("Kyiv", INTERVAL, token).await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(events[0].is_checked());
        assert!(!events[0].status().is_alert);
        assert!(events[1].is_changed());
        assert!(events[1].status().is_alert);

        assert_eq!(repo.region_calls(), 2);
    }

    #[tokio::test]
    async fn test_clones_track_concurrently() {
        let repo = Arc::new(
            ScriptedRepository::new().then_region(alerted_region("14", "Kyiv")),
        );
        let monitor = RegionAlertMonitor::new(repo.clone());

        let mut handles = Vec::new();
        for _ in 0..2 {
            let mut tracker = monitor.clone();
            let mut rx = tracker.events();
            let token = CancellationToken::new();
            cancel_after_checks(&mut tracker, &token, 2);

            handles.push(tokio::spawn(async move {
                tracker.start_tracking("Kyiv", INTERVAL, token).await.unwrap();
                drain(&mut rx)
            }));
        }

        for handle in handles {
            let events = handle.await.unwrap();
            let changed = events.iter().filter(|e| e.is_changed()).count();
            assert_eq!(changed, 1);
        }
    }
}
