//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Validate names that end up in HTTP headers or URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, Method};
use thiserror::Error;

use crate::config::schema::{CorsConfig, GatewayConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("rawg.base_url '{0}' is not an http(s) URL")]
    BaseUrl(String),

    #[error("rawg.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("api_key.header_name '{0}' is not a valid header name")]
    HeaderName(String),

    #[error("api_key.query_parameter_name must not be empty")]
    EmptyQueryParameter,

    #[error("api_key.require_api_key is set but api_key.valid_api_keys is empty")]
    NoValidKeys,

    #[error("cors.{field} entry '{value}' is invalid")]
    CorsEntry { field: &'static str, value: String },

    #[error("cors.allow_credentials cannot be combined with a wildcard origin")]
    CorsCredentialsWithWildcard,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match url::Url::parse(&config.rawg.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::BaseUrl(config.rawg.base_url.clone())),
    }

    if config.rawg.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if HeaderName::from_bytes(config.api_key.header_name.as_bytes()).is_err() {
        errors.push(ValidationError::HeaderName(config.api_key.header_name.clone()));
    }

    if config.api_key.query_parameter_name.is_empty() {
        errors.push(ValidationError::EmptyQueryParameter);
    }

    if config.api_key.require_api_key && config.api_key.valid_api_keys.is_empty() {
        errors.push(ValidationError::NoValidKeys);
    }

    if config.cors.enabled {
        validate_cors(&config.cors, &mut errors);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_cors(cors: &CorsConfig, errors: &mut Vec<ValidationError>) {
    for origin in &cors.allowed_origins {
        if origin == "*" {
            if cors.allow_credentials {
                errors.push(ValidationError::CorsCredentialsWithWildcard);
            }
        } else if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::CorsEntry {
                field: "allowed_origins",
                value: origin.clone(),
            });
        }
    }

    for method in &cors.allowed_methods {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::CorsEntry {
                field: "allowed_methods",
                value: method.clone(),
            });
        }
    }

    for header in &cors.allowed_headers {
        if HeaderName::from_bytes(header.as_bytes()).is_err() {
            errors.push(ValidationError::CorsEntry {
                field: "allowed_headers",
                value: header.clone(),
            });
        }
    }
}
