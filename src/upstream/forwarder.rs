//! Upstream forwarder with bounded retries.
//!
//! # Responsibilities
//! - Build the upstream URL with the injected credential
//! - Retry rate-limited and network-failed attempts with exponential backoff
//! - Fail fast on every other non-2xx status
//!
//! # Design Decisions
//! - Retryability is decided per attempt from `UpstreamError::is_retryable`
//! - Total attempts never exceed `max_retries + 1`
//! - Dropping the returned future cancels the in-flight call or backoff sleep

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RawgApiConfig;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;
use crate::upstream::builder::{build_url, QueryParams};
use crate::upstream::error::UpstreamError;
use crate::upstream::transport::{HttpTransport, RawPayload, Transport};

/// Capability to GET an upstream endpoint and receive its raw body.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload, UpstreamError>;
}

/// Forwards calls to the upstream through a [`Transport`], retrying per policy.
pub struct Forwarder<T = HttpTransport> {
    transport: T,
    base_url: String,
    credential: String,
    max_retries: u32,
    backoff_unit: Duration,
}

impl Forwarder<HttpTransport> {
    /// Build a forwarder with a pooled HTTP client from configuration.
    pub fn from_config(config: &RawgApiConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> Forwarder<T> {
    pub fn new(transport: T, config: &RawgApiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            credential: config.api_key.clone(),
            max_retries: config.max_retries,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }

    async fn forward(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload, UpstreamError> {
        let url = build_url(&self.base_url, endpoint, &self.credential, params);
        let resource = metrics::resource_label(endpoint);
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!(endpoint = %endpoint, attempt, "Calling upstream");

            match self.transport.fetch(&url).await {
                Ok(payload) => {
                    metrics::record_upstream_attempt(resource, "success");
                    tracing::debug!(
                        endpoint = %endpoint,
                        attempt,
                        bytes = payload.as_bytes().len(),
                        "Upstream call succeeded"
                    );
                    return Ok(payload);
                }
                Err(err) if err.is_retryable() => {
                    metrics::record_upstream_attempt(resource, err.kind());
                    attempt += 1;

                    if attempt > self.max_retries {
                        metrics::record_upstream_failure(resource, "retries_exhausted");
                        tracing::warn!(
                            endpoint = %endpoint,
                            attempts = attempt,
                            error = %err,
                            "Upstream retries exhausted"
                        );
                        return Err(UpstreamError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(err),
                        });
                    }

                    let delay = calculate_backoff(attempt, self.backoff_unit);
                    metrics::record_upstream_retry(resource, err.kind());
                    tracing::info!(
                        endpoint = %endpoint,
                        attempt,
                        max_retries = self.max_retries,
                        delay = ?delay,
                        error = %err,
                        "Retrying upstream call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    metrics::record_upstream_attempt(resource, err.kind());
                    metrics::record_upstream_failure(resource, err.kind());
                    tracing::warn!(
                        endpoint = %endpoint,
                        attempt,
                        error = %err,
                        "Upstream call failed without retry"
                    );
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl<T: Transport> Upstream for Forwarder<T> {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload, UpstreamError> {
        self.forward(endpoint, params).await
    }
}
