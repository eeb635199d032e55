//! CORE API client
//!
//! Fetches record payloads from the authenticated mines API, paging
//! through the search endpoint with a bearer token obtained from the
//! [`TokenSession`]. Fetches retry with exponential backoff; token
//! acquisition never retries (the outer ingestion loop owns that
//! decision).

use super::models::RecordPage;
use super::token::{HttpTokenFetcher, TokenSession};
use crate::config::{CoreApiConfig, RetryConfig};
use crate::domain::{NrptiError, Result};
use serde_json::Value;
use std::time::Duration;

/// Authenticated client for the CORE record search API
pub struct CoreApiClient {
    http: reqwest::Client,
    config: CoreApiConfig,
    session: TokenSession,
}

impl CoreApiClient {
    /// Creates a client and its token session from configuration
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn new(config: CoreApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                NrptiError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let session = TokenSession::new(
            Box::new(HttpTokenFetcher::new(http.clone(), &config)),
            Duration::from_secs(config.token_buffer_seconds),
        );

        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// Fetch every record payload from the search endpoint
    ///
    /// Pages sequentially until the server reports the last page.
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::AuthenticationFailed` if a token cannot be
    /// obtained, or `NrptiError::SourceFetch` if a page request fails
    /// after retries.
    pub async fn fetch_records(&self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        let mut page = 1u64;

        loop {
            let response = self.fetch_page(page).await?;
            let total_pages = response.total_pages;

            tracing::debug!(
                page = page,
                total_pages = total_pages,
                page_records = response.records.len(),
                "Fetched CORE record page"
            );

            records.extend(response.records);

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        tracing::info!(count = records.len(), "Fetched CORE records");
        Ok(records)
    }

    async fn fetch_page(&self, page: u64) -> Result<RecordPage> {
        let url = format!("{}/records", self.config.base_url.trim_end_matches('/'));

        self.retry_request(|| async {
            let token = self.session.ensure_valid_token().await?;

            let response = self
                .http
                .get(&url)
                .bearer_auth(&token)
                .query(&[
                    ("page", page.to_string()),
                    ("per_page", self.config.page_size.to_string()),
                ])
                .send()
                .await
                .map_err(|e| NrptiError::SourceFetch(format!("CORE request failed: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(NrptiError::SourceFetch(format!(
                    "CORE record search returned {status}: {body}"
                )));
            }

            response
                .json::<RecordPage>()
                .await
                .map_err(|e| NrptiError::SourceFetch(format!("Invalid CORE response: {e}")))
        })
        .await
    }

    /// Retry a fetch with exponential backoff
    ///
    /// Authentication failures are not retried: a rejected credential
    /// will not succeed on the next attempt, so the error goes straight
    /// back to the caller.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e @ NrptiError::AuthenticationFailed(_)) => return Err(e),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(&self.config.retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying CORE request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

/// Backoff delay before retry `attempt` (1-based), capped at the
/// configured maximum
///
/// Computed in `f64` so fractional multipliers compound before the final
/// cast instead of truncating to an integer factor each step.
fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let factor = retry.backoff_multiplier.powi((attempt - 1) as i32);
    let delay = (retry.initial_delay_ms as f64 * factor) as u64;
    delay.min(retry.max_delay_ms)
}
