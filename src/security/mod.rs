//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight and origin headers)
//!     → admission.rs (API key decision, applied by http::middleware)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Fail closed: a required key that is missing or unknown is rejected
//! - Keys are compared by exact match and never logged

pub mod admission;
pub mod cors;

pub use admission::{AdmissionDecision, ApiKeyContext, ApiKeyGate, DenialReason};
