//! CORE API token session
//!
//! Maintains a single cached bearer token for the authenticated CORE
//! API, refreshing it when absent or within a safety buffer of its
//! declared expiry.
//!
//! The session is an explicit object with injected clock and fetcher
//! dependencies — constructed once per ingestion run and shared by
//! reference — rather than process-wide mutable state. The refresh is a
//! critical section: the async mutex is held across the token request,
//! so concurrent callers that race into the buffer window produce
//! exactly one request; the rest observe the fresh token when the lock
//! is released.

use crate::config::CoreApiConfig;
use crate::domain::{NrptiError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// A token as issued by the credential grant
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Bearer token value
    pub access_token: String,

    /// Server-declared lifetime in seconds
    pub expires_in: u64,
}

/// Performs the credential-grant token request
///
/// Abstracted so tests can count and control token requests without a
/// live endpoint.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Request a fresh token
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::AuthenticationFailed` on network or
    /// credential failure. The session performs no automatic retry; the
    /// caller's ingestion loop decides whether to abort or skip the
    /// source.
    async fn fetch_token(&self) -> Result<IssuedToken>;
}

/// Time source for expiry computation, injectable for tests
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall-clock implementation of [`Clock`]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Cached bearer-token session with single-flight refresh
pub struct TokenSession {
    fetcher: Box<dyn TokenFetcher>,
    clock: Box<dyn Clock>,
    buffer: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSession {
    /// Creates a session using the system clock
    pub fn new(fetcher: Box<dyn TokenFetcher>, buffer: Duration) -> Self {
        Self::with_clock(fetcher, Box::new(SystemClock), buffer)
    }

    /// Creates a session with an injected clock
    pub fn with_clock(
        fetcher: Box<dyn TokenFetcher>,
        clock: Box<dyn Clock>,
        buffer: Duration,
    ) -> Self {
        Self {
            fetcher,
            clock,
            buffer,
            cached: Mutex::new(None),
        }
    }

    /// Returns a token valid for at least the safety buffer
    ///
    /// Returns the cached token while `now < issue + lifetime − buffer`;
    /// otherwise performs one credential-grant request, replaces the
    /// cache and returns the new token. On failure the cache is cleared
    /// (the session collapses back to unauthenticated) and
    /// `NrptiError::AuthenticationFailed` propagates.
    pub async fn ensure_valid_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if self.clock.now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        // Expired or absent: drop the stale entry before the request so a
        // failed refresh leaves the session unauthenticated, not stale.
        *cached = None;

        tracing::debug!("Requesting new CORE API token");
        let issued = self.fetcher.fetch_token().await?;

        let usable_lifetime =
            Duration::from_secs(issued.expires_in).saturating_sub(self.buffer);
        let expires_at = self.clock.now() + usable_lifetime;

        tracing::info!(
            expires_in = issued.expires_in,
            buffer_secs = self.buffer.as_secs(),
            "CORE API token refreshed"
        );

        *cached = Some(CachedToken {
            access_token: issued.access_token.clone(),
            expires_at,
        });

        Ok(issued.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// [`TokenFetcher`] performing a client-credentials grant over HTTPS
pub struct HttpTokenFetcher {
    http: reqwest::Client,
    token_url: String,
    grant_type: String,
    client_id: String,
    client_secret: String,
}

impl HttpTokenFetcher {
    /// Creates a fetcher from the CORE API configuration
    pub fn new(http: reqwest::Client, config: &CoreApiConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            grant_type: config.grant_type.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.expose_secret().as_ref().to_string(),
        }
    }
}

#[async_trait]
impl TokenFetcher for HttpTokenFetcher {
    async fn fetch_token(&self) -> Result<IssuedToken> {
        let params = [
            ("grant_type", self.grant_type.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                NrptiError::AuthenticationFailed(format!("Token request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NrptiError::AuthenticationFailed(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            NrptiError::AuthenticationFailed(format!("Invalid token response: {e}"))
        })?;

        Ok(IssuedToken {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }
}
