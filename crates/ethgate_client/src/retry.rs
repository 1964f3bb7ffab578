//! Bounded retry loop around the transport.

use std::{future::Future, time::Duration};

use crate::error::GatewayError;

/// Fixed delay between attempts.
const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Runs `operation` up to `max_attempts` times, suspending for
/// [`RETRY_DELAY`] after every transiently-failed attempt that leaves budget
/// for another one.
///
/// Fatal failures propagate unchanged. When the budget runs out, the last
/// transient failure is folded into [`GatewayError::ExhaustedRetries`].
///
/// `max_attempts` must be at least 1; the public constructors validate this.
pub(crate) async fn with_retries<SuccessT, OperationT, FutureT>(
    max_attempts: u32,
    mut operation: OperationT,
) -> Result<SuccessT, GatewayError>
where
    OperationT: FnMut() -> FutureT,
    FutureT: Future<Output = Result<SuccessT, GatewayError>>,
{
    debug_assert!(max_attempts >= 1);

    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(success) => return Ok(success),
            Err(error) if !error.is_transient() => return Err(error),
            Err(error) => {
                if attempt >= max_attempts {
                    return Err(GatewayError::ExhaustedRetries {
                        attempts: max_attempts,
                        original: error.to_string(),
                    });
                }

                log::debug!(
                    "gateway fetch attempt {attempt}/{max_attempts} failed: {error}; retrying"
                );
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
