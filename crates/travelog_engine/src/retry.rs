use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use travelog_logging::{travel_error, travel_info, travel_warn};

use crate::{FailureKind, FetchError, FetchEvent, FetchRequest, FetchSettings, RowFetcher};

pub trait FetchEventSink: Send + Sync {
    fn emit(&self, event: FetchEvent);
}

/// Discards every event.
pub struct NullSink;

impl FetchEventSink for NullSink {
    fn emit(&self, _event: FetchEvent) {}
}

/// Delay before attempt `attempt + 1`: `base * 2^(attempt - 1)`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    base.saturating_mul(1 << exponent)
}

/// Fetches rows, retrying transient failures with exponential backoff.
///
/// Terminal failures return at once. After the last attempt the final error is
/// returned with its attempt count. Cancelling `cancel` aborts both the request
/// and any pending backoff.
pub async fn fetch_with_retry(
    fetcher: &dyn RowFetcher,
    request: &FetchRequest,
    settings: &FetchSettings,
    cancel: &CancellationToken,
    sink: &dyn FetchEventSink,
) -> Result<(Vec<Value>, u32), FetchError> {
    let max_attempts = settings.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        sink.emit(FetchEvent::AttemptStarted { attempt });
        let url = request.url_at(Utc::now());

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(cancelled()),
            result = fetcher.fetch_rows(&url) => result,
        };

        let error = match result {
            Ok(rows) => {
                travel_info!(
                    "Fetched {} rows from {} source on attempt {}",
                    rows.len(),
                    request.source,
                    attempt
                );
                sink.emit(FetchEvent::Completed {
                    attempt,
                    rows: rows.len(),
                });
                return Ok((rows, attempt));
            }
            Err(error) => error.after_attempts(attempt),
        };

        if !error.is_transient() || attempt >= max_attempts {
            travel_error!(
                "Giving up on {} source after attempt {}: {}",
                request.source,
                attempt,
                error
            );
            sink.emit(FetchEvent::AttemptFailed {
                attempt,
                error: error.clone(),
                retry_in: None,
            });
            return Err(error);
        }

        let delay = backoff_delay(settings.base_delay, attempt);
        travel_warn!(
            "Attempt {} for {} source failed: {}; retrying in {:?}",
            attempt,
            request.source,
            error,
            delay
        );
        sink.emit(FetchEvent::AttemptFailed {
            attempt,
            error,
            retry_in: Some(delay),
        });

        tokio::select! {
            _ = cancel.cancelled() => return Err(cancelled().after_attempts(attempt)),
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

fn cancelled() -> FetchError {
    FetchError::new(FailureKind::Cancelled, "fetch cancelled")
}
