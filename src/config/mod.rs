//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to the admission gate, forwarder and handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_with_overrides, parse_config, ConfigError, ConfigOverrides};
pub use schema::{
    ApiKeyConfig, CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig,
    RateLimitConfig, RawgApiConfig,
};
pub use validation::ValidationError;
