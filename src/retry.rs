//! Bounded-attempt retry for mutating store calls.

use log::{debug, warn};
use std::future::Future;

use crate::error::Result;

/// Run `op`, re-issuing it with the same payload up to `max_retries` more
/// times on failure. First success wins; once the budget is exhausted the
/// last error is returned unmodified.
///
/// Retries are immediate and sequential — no backoff, no jitter, at most one
/// call in flight. The retry is blind: errors are not classified, so a
/// permanent failure (e.g. a validation rejection) burns the whole budget
/// before surfacing. That is the accepted contract of this layer, not an
/// oversight; classifying transient vs. permanent errors would change
/// observable behavior.
///
/// `max_retries == 0` means a single attempt with no retry.
pub(crate) async fn with_attempts<T, F, Fut>(op_name: &str, max_retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut remaining = max_retries;
    loop {
        match op().await {
            Ok(value) => {
                debug!(
                    "[RETRY] {} succeeded ({} attempts left)",
                    op_name, remaining
                );
                return Ok(value);
            }
            Err(err) if remaining > 0 => {
                remaining -= 1;
                warn!(
                    "[RETRY] {} failed, retrying ({} attempts left): {}",
                    op_name, remaining, err
                );
            }
            Err(err) => {
                warn!("[RETRY] {} failed, budget exhausted: {}", op_name, err);
                return Err(err);
            }
        }
    }
}
