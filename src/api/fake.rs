//! In-process `Upstream` double for handler and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::upstream::{QueryParams, RawPayload, Upstream, UpstreamError};

#[derive(Debug, Clone)]
enum Outcome {
    Body(Bytes),
    Status(u16),
    Network,
}

/// Answers every call with the same outcome and records what was asked.
pub(crate) struct FakeUpstream {
    outcome: Outcome,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeUpstream {
    pub(crate) fn json(body: Value) -> Self {
        Self::with(Outcome::Body(Bytes::from(body.to_string())))
    }

    pub(crate) fn raw(body: &'static str) -> Self {
        Self::with(Outcome::Body(Bytes::from_static(body.as_bytes())))
    }

    pub(crate) fn status(status: u16) -> Self {
        Self::with(Outcome::Status(status))
    }

    pub(crate) fn unreachable() -> Self {
        Self::with(Outcome::Network)
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Endpoint and forwarded (non-empty) params of the most recent call.
    pub(crate) fn last_call(&self) -> Option<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<RawPayload, UpstreamError> {
        let forwarded = params
            .iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.to_string())))
            .collect();
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), forwarded));

        match &self.outcome {
            Outcome::Body(bytes) => Ok(RawPayload::new(bytes.clone())),
            Outcome::Status(status) => Err(UpstreamError::NonRetryableStatus(*status)),
            Outcome::Network => Err(UpstreamError::RetriesExhausted {
                attempts: 1,
                last: Box::new(UpstreamError::TransientNetwork("connection refused".into())),
            }),
        }
    }
}
