//! Per-call fault boundary shared by the initializer and the dispatcher.
//!
//! Every plugin call runs on its own task. The caller only awaits the join
//! handle, so a plugin that blocks its thread cannot hold the caller past the
//! time bound or stall sibling calls.

use std::any::Any;
use std::future::Future;
use std::time::Duration;

use crate::error::{FaultCause, PluginError};

/// Drives one plugin call on a dedicated task, converting errors, panics, and
/// an exceeded time bound into a [`FaultCause`].
///
/// On timeout the task is aborted and its eventual output discarded.
pub(crate) async fn guard<T, F>(future: F, timeout: Option<Duration>) -> Result<T, FaultCause>
where
    F: Future<Output = Result<T, PluginError>> + Send + 'static,
    T: Send + 'static,
{
    let mut handle = tokio::spawn(future);

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                return Err(FaultCause::Timeout(limit));
            }
        },
        None => handle.await,
    };

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(FaultCause::Error(e)),
        Err(join_error) if join_error.is_panic() => Err(FaultCause::Panic(panic_message(
            join_error.into_panic().as_ref(),
        ))),
        Err(join_error) => Err(FaultCause::Aborted(join_error.to_string())),
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_passes_value_through() {
        let value = guard(async { Ok::<_, PluginError>(7) }, None).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_guard_maps_plugin_error() {
        let cause = guard(async { Err::<(), _>(PluginError::failed("boom")) }, None)
            .await
            .unwrap_err();
        assert!(matches!(cause, FaultCause::Error(PluginError::Failed(ref m)) if m == "boom"));
    }

    #[tokio::test]
    async fn test_guard_catches_panic() {
        let cause = guard(
            async {
                if true {
                    panic!("plugin exploded");
                }
                Ok::<(), PluginError>(())
            },
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(cause, FaultCause::Panic(ref m) if m == "plugin exploded"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guard_enforces_timeout() {
        let limit = Duration::from_millis(50);
        let cause = guard(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<(), PluginError>(())
            },
            Some(limit),
        )
        .await
        .unwrap_err();
        assert!(matches!(cause, FaultCause::Timeout(d) if d == limit));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_guard_times_out_thread_blocking_call() {
        let limit = Duration::from_millis(50);
        let started = std::time::Instant::now();
        let cause = guard(
            async {
                std::thread::sleep(Duration::from_millis(400));
                Ok::<_, PluginError>("late")
            },
            Some(limit),
        )
        .await
        .unwrap_err();

        assert!(matches!(cause, FaultCause::Timeout(d) if d == limit));
        assert!(started.elapsed() < Duration::from_millis(300));
    }
}
