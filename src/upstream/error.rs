//! Upstream failure classification.

use thiserror::Error;

/// Classified outcome of a failed upstream call.
///
/// `RateLimited` and `TransientNetwork` describe a single attempt and are
/// retried by the forwarder. Callers of the forwarder only ever observe
/// `NonRetryableStatus` or `RetriesExhausted`.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered 429 Too Many Requests.
    #[error("upstream rate limited the request")]
    RateLimited,

    /// Failure below the HTTP layer (connect, timeout, DNS, body read).
    #[error("network error: {0}")]
    TransientNetwork(String),

    /// Any non-2xx status other than 429.
    #[error("upstream returned status {0}")]
    NonRetryableStatus(u16),

    /// The retry budget ran out; `last` is the final attempt's failure.
    #[error("upstream call failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<UpstreamError>,
    },
}

impl UpstreamError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, UpstreamError::RateLimited | UpstreamError::TransientNetwork(_))
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::RateLimited => "rate_limited",
            UpstreamError::TransientNetwork(_) => "transient_network",
            UpstreamError::NonRetryableStatus(_) => "non_retryable_status",
            UpstreamError::RetriesExhausted { .. } => "retries_exhausted",
        }
    }
}

/// The payload did not match the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("payload does not match {target}: {source}")]
    Shape {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure between the route handler and the upstream.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Upstream(e) => e.kind(),
            GatewayError::Decode(_) => "decode_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(UpstreamError::RateLimited.is_retryable());
        assert!(UpstreamError::TransientNetwork("refused".into()).is_retryable());
        assert!(!UpstreamError::NonRetryableStatus(404).is_retryable());
        assert!(!UpstreamError::RetriesExhausted {
            attempts: 4,
            last: Box::new(UpstreamError::RateLimited),
        }
        .is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = UpstreamError::RetriesExhausted {
            attempts: 4,
            last: Box::new(UpstreamError::RateLimited),
        };
        assert_eq!(
            err.to_string(),
            "upstream call failed after 4 attempts: upstream rate limited the request"
        );
        assert_eq!(
            UpstreamError::NonRetryableStatus(503).to_string(),
            "upstream returned status 503"
        );
    }

    #[test]
    fn test_gateway_error_kind() {
        let err: GatewayError = UpstreamError::NonRetryableStatus(500).into();
        assert_eq!(err.kind(), "non_retryable_status");
    }
}
