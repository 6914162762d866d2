//! Inbound API key admission.
//!
//! # Decision Order
//! ```text
//! exempt path?            → Allowed
//! checking disabled?      → Allowed
//! no key in header/query? → Denied(MissingCredential)
//! key not in the set?     → Denied(InvalidCredential)
//! otherwise               → Allowed with the key attached
//! ```
//!
//! Every step is a pure function of configuration and the request line, so
//! the gate never fails; absence of a key is itself a denying outcome.

use std::collections::HashSet;

use axum::http::header::InvalidHeaderName;
use axum::http::{HeaderMap, HeaderName};
use url::form_urlencoded;

use crate::config::ApiKeyConfig;

/// Path prefixes that bypass the key check, matched per segment and
/// case-insensitively.
pub const EXEMPT_PATHS: &[&str] = &[
    "/api/status",
    "/swagger",
    "/docs",
    "/static",
    "/favicon.ico",
];

/// Caller key accepted by the gate, available to handlers as a request
/// extension.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyContext(String);

impl ApiKeyContext {
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKeyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeyContext(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    MissingCredential,
    InvalidCredential,
}

impl DenialReason {
    /// Message returned to the caller in the 401 body.
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::MissingCredential => "API key is required",
            DenialReason::InvalidCredential => "Invalid API key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Proceed. `credential` is set when a key was checked and matched.
    Allowed { credential: Option<ApiKeyContext> },
    Denied(DenialReason),
}

/// Immutable admission policy built once from configuration.
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    required: bool,
    valid_keys: HashSet<String>,
    header_name: HeaderName,
    query_name: String,
}

impl ApiKeyGate {
    pub fn from_config(config: &ApiKeyConfig) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            required: config.require_api_key,
            valid_keys: config.valid_api_keys.iter().cloned().collect(),
            header_name: HeaderName::from_bytes(config.header_name.as_bytes())?,
            query_name: config.query_parameter_name.clone(),
        })
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_exempt(path: &str) -> bool {
        EXEMPT_PATHS.iter().any(|prefix| starts_with_segments(path, prefix))
    }

    /// Pull the caller key from the header, or from the query string when the
    /// header is absent. A present header wins even when empty. Bytes that
    /// are not UTF-8 are replaced, so such a key is kept but never matches.
    pub fn extract(&self, headers: &HeaderMap, query: Option<&str>) -> Option<String> {
        if let Some(value) = headers.get(&self.header_name) {
            return Some(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let query = query?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == self.query_name.as_str())
            .map(|(_, value)| value.into_owned())
    }

    pub fn evaluate(&self, path: &str, headers: &HeaderMap, query: Option<&str>) -> AdmissionDecision {
        if Self::is_exempt(path) || !self.required {
            return AdmissionDecision::Allowed { credential: None };
        }

        match self.extract(headers, query) {
            Some(key) if key.is_empty() => AdmissionDecision::Denied(DenialReason::MissingCredential),
            None => AdmissionDecision::Denied(DenialReason::MissingCredential),
            Some(key) if self.valid_keys.contains(&key) => AdmissionDecision::Allowed {
                credential: Some(ApiKeyContext(key)),
            },
            Some(_) => AdmissionDecision::Denied(DenialReason::InvalidCredential),
        }
    }
}

/// `path` equals `prefix` or continues it with a `/`, ignoring ASCII case.
fn starts_with_segments(path: &str, prefix: &str) -> bool {
    if path.len() < prefix.len() || !path.is_char_boundary(prefix.len()) {
        return false;
    }
    let (head, rest) = path.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix) && (rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate(required: bool) -> ApiKeyGate {
        ApiKeyGate::from_config(&ApiKeyConfig {
            require_api_key: required,
            valid_api_keys: vec!["abc".into(), "def".into()],
            ..Default::default()
        })
        .unwrap()
    }

    fn headers(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_exempt_paths() {
        assert!(ApiKeyGate::is_exempt("/api/status"));
        assert!(ApiKeyGate::is_exempt("/api/status/health"));
        assert!(ApiKeyGate::is_exempt("/API/Status/Health"));
        assert!(ApiKeyGate::is_exempt("/swagger/index.html"));
        assert!(ApiKeyGate::is_exempt("/favicon.ico"));
        assert!(!ApiKeyGate::is_exempt("/api/statuses"));
        assert!(!ApiKeyGate::is_exempt("/api/games"));
        assert!(!ApiKeyGate::is_exempt("/"));
    }

    #[test]
    fn test_health_allowed_with_invalid_key() {
        let decision = gate(true).evaluate("/api/status/health", &headers("wrong"), None);
        assert_eq!(decision, AdmissionDecision::Allowed { credential: None });
    }

    #[test]
    fn test_disabled_allows_everything() {
        let gate = gate(false);
        assert!(matches!(
            gate.evaluate("/api/games", &HeaderMap::new(), None),
            AdmissionDecision::Allowed { .. }
        ));
        assert!(matches!(
            gate.evaluate("/api/games", &headers("wrong"), None),
            AdmissionDecision::Allowed { .. }
        ));
    }

    #[test]
    fn test_missing_credential() {
        assert_eq!(
            gate(true).evaluate("/api/games", &HeaderMap::new(), Some("page=2")),
            AdmissionDecision::Denied(DenialReason::MissingCredential)
        );
        assert_eq!(
            gate(true).evaluate("/api/games", &HeaderMap::new(), Some("api_key=")),
            AdmissionDecision::Denied(DenialReason::MissingCredential)
        );
    }

    #[test]
    fn test_invalid_credential() {
        assert_eq!(
            gate(true).evaluate("/api/games", &headers("wrong"), None),
            AdmissionDecision::Denied(DenialReason::InvalidCredential)
        );
        assert_eq!(
            gate(true).evaluate("/api/games", &headers("ABC"), None),
            AdmissionDecision::Denied(DenialReason::InvalidCredential)
        );
    }

    #[test]
    fn test_valid_key_from_header_or_query() {
        let gate = gate(true);
        match gate.evaluate("/api/games", &headers("abc"), None) {
            AdmissionDecision::Allowed { credential: Some(ctx) } => assert_eq!(ctx.key(), "abc"),
            other => panic!("unexpected decision: {other:?}"),
        }
        match gate.evaluate("/api/genres", &HeaderMap::new(), Some("page=1&api_key=def")) {
            AdmissionDecision::Allowed { credential: Some(ctx) } => assert_eq!(ctx.key(), "def"),
            other => panic!("unexpected decision: {other:?}"),
        }
    }

    #[test]
    fn test_header_takes_precedence() {
        let gate = gate(true);
        assert_eq!(
            gate.evaluate("/api/games", &headers("wrong"), Some("api_key=abc")),
            AdmissionDecision::Denied(DenialReason::InvalidCredential)
        );
        assert_eq!(
            gate.extract(&headers(""), Some("api_key=abc")),
            Some(String::new())
        );
    }

    #[test]
    fn test_non_utf8_header_is_invalid_not_missing() {
        let gate = gate(true);
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_bytes(&[0xab, 0xff, 0x63]).unwrap());

        assert_eq!(
            gate.evaluate("/api/games", &headers, Some("api_key=abc")),
            AdmissionDecision::Denied(DenialReason::InvalidCredential)
        );
    }

    #[test]
    fn test_custom_names() {
        let gate = ApiKeyGate::from_config(&ApiKeyConfig {
            require_api_key: true,
            valid_api_keys: vec!["k 1".into()],
            header_name: "X-Client-Key".into(),
            query_parameter_name: "token".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gate.extract(&HeaderMap::new(), Some("token=k%201")), Some("k 1".into()));
        assert!(matches!(
            gate.evaluate("/api/games", &HeaderMap::new(), Some("token=k+1")),
            AdmissionDecision::Allowed { credential: Some(_) }
        ));
    }

    #[test]
    fn test_context_debug_is_redacted() {
        let ctx = ApiKeyContext("abc".into());
        assert!(!format!("{ctx:?}").contains("abc"));
    }
}
