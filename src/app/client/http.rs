//! Core HTTP operations with client-side rate limiting
//!
//! Requests are paced by a `governor` rate limiter and are never retried
//! here: a failed call is reported to the fetcher, which discards the whole
//! fetch.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{FetchError, FetchResult};

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limiting
    ///
    /// # Errors
    ///
    /// Returns `FetchError::RateLimiter` if `rate_limit_rps` is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> FetchResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(
        rate_limit_rps: u32,
    ) -> FetchResult<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>> {
        let quota = Quota::per_second(NonZeroU32::new(rate_limit_rps).ok_or_else(|| {
            FetchError::RateLimiter {
                reason: "Rate limit must be non-zero".to_string(),
            }
        })?);
        Ok(RateLimiter::direct(quota))
    }

    /// Fetches `url` and returns the response body once the status is a success
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` on transport failure and
    /// `FetchError::ServerError` on a non-success status
    pub async fn get_bytes(&self, url: &Url) -> FetchResult<Vec<u8>> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            FetchError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} responded with HTTP {}", url, status.as_u16());
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }

    /// Fetches `url` and decodes the JSON body
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the body is not valid JSON for `T`,
    /// plus any error from [`HttpHandler::get_bytes`]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> FetchResult<T> {
        let body = self.get_bytes(url).await?;
        decode_json(url, &body)
    }
}

/// Decodes a JSON body, tagging failures with the URL it came from
pub fn decode_json<T: DeserializeOwned>(url: &Url, body: &[u8]) -> FetchResult<T> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
