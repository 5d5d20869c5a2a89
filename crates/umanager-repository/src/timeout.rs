//! Per-operation deadline for store round-trips.

use std::future::IntoFuture;
use std::time::Duration;
use tracing::warn;
use umanager_core::{UmanagerError, UmanagerResult};

/// Runs one store round-trip under `duration`.
///
/// The driver future is dropped, and with it the in-flight request, when
/// the deadline elapses. Driver errors are converted without being
/// reclassified.
pub async fn with_timeout<F, T, E>(operation: &'static str, duration: Duration, f: F) -> UmanagerResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Into<UmanagerError>,
{
    match tokio::time::timeout(duration, f).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!(operation, timeout = ?duration, "Store operation timed out");
            Err(UmanagerError::timeout(operation, duration))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout("op", Duration::from_secs(1), async {
            Ok::<_, UmanagerError>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout("slow.op", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, UmanagerError>(42)
        })
        .await;

        assert!(matches!(
            result,
            Err(UmanagerError::Timeout { operation: "slow.op", .. })
        ));
    }

    #[tokio::test]
    async fn test_driver_error_passes_through() {
        let result: UmanagerResult<()> = with_timeout("op", Duration::from_secs(1), async {
            Err(sqlx::Error::RowNotFound)
        })
        .await;

        assert!(matches!(result, Err(UmanagerError::Sql(sqlx::Error::RowNotFound))));
    }
}
