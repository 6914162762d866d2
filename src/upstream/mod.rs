//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler (endpoint + QueryParams)
//!     → builder.rs (URL with injected credential)
//!     → forwarder.rs (retry loop, backoff)
//!     → transport.rs (one GET, classified)
//!     → decode.rs (RawPayload → typed model)
//!     → Route handler
//! ```

pub mod builder;
pub mod decode;
pub mod error;
pub mod forwarder;
pub mod transport;

pub use builder::{build_url, QueryParams};
pub use decode::{decode, fetch};
pub use error::{DecodeError, GatewayError, UpstreamError};
pub use forwarder::{Forwarder, Upstream};
pub use transport::{HttpTransport, RawPayload, Transport};
