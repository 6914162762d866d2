//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gate, handlers and forwarder produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! tower-http adds per-request spans and the x-request-id header.
//! ```

pub mod logging;
pub mod metrics;
