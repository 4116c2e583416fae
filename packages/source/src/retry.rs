//! HTTP retry helpers for transient errors.
//!
//! Remote dataset downloads go through [`send_text`], which retries
//! connection failures, timeouts, HTTP 429 and HTTP 5xx with exponential
//! backoff. Other 4xx responses fail immediately.

use std::time::Duration;

use crate::FetchError;

/// Maximum number of retries after the first attempt.
const MAX_RETRIES: u32 = 3;

/// Sends the request built by `build_request` and returns the body text.
///
/// The closure is called once per attempt since a
/// [`reqwest::RequestBuilder`] is consumed by `send()`.
///
/// # Errors
///
/// Returns [`FetchError`] if the request still fails after all retries or
/// the server answers with a non-retryable status.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F) -> Result<String, FetchError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let response = send_inner(&build_request, MAX_RETRIES).await?;
    Ok(response.text().await?)
}

#[allow(clippy::future_not_send)]
async fn send_inner<F>(build_request: &F, max_retries: u32) -> Result<reqwest::Response, FetchError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt); // 2s, 4s, 8s
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::warn!("  transient error: {e}");
                    attempt += 1;
                    continue;
                }
                return Err(FetchError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if is_retryable_status(status) && attempt < max_retries {
                    log::warn!("  HTTP {status} from {}", response.url());
                    attempt += 1;
                    continue;
                }

                if status.is_client_error() || status.is_server_error() {
                    return Err(FetchError::Status {
                        url: response.url().to_string(),
                        status: status.as_u16(),
                    });
                }

                return Ok(response);
            }
        }
    }
}

fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}
