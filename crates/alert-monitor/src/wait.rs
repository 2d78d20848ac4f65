use std::time::Duration;

use alert_core::AlertError;
use tokio_util::sync::CancellationToken;

/// Sleep for `interval` unless cancelled first. Returns `false` on cancellation.
pub(crate) async fn wait_or_cancel(interval: Duration, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;

        _ = token.cancelled() => false,
        _ = tokio::time::sleep(interval) => true,
    }
}

pub(crate) fn ensure_interval(interval: Duration) -> Result<(), AlertError> {
    if interval.is_zero() {
        return Err(AlertError::OutOfRange {
            name: "interval",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
