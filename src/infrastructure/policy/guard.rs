//! Timeout guard for calls to external collaborators

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::DomainError;
use crate::infrastructure::observability::record_provider_failure;

/// Await `call` for at most `seconds`; failures and timeouts are logged and counted
pub async fn guarded<T, F>(operation: &'static str, seconds: u64, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    let result = match tokio::time::timeout(Duration::from_secs(seconds), call).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::timeout(operation, seconds)),
    };

    if let Err(ref e) = result {
        warn!(operation, error = %e, "External call failed");
        record_provider_failure(operation);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_result_through() {
        let value = guarded("evidence_search", 1, async { Ok::<_, DomainError>(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_error() {
        let err = guarded("web_search", 10, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, DomainError>(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::Timeout { seconds: 10, .. }));
        assert_eq!(err.to_string(), "Timeout: web_search did not complete within 10s");
    }

    #[tokio::test]
    async fn test_error_passes_through() {
        let err = guarded("llm", 1, async {
            Err::<(), _>(DomainError::provider("openai", "quota"))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }
}
