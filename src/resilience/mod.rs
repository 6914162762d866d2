//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound call to the upstream:
//!     → per-attempt timeout (reqwest client)
//!     → On 429 or network failure: backoff.rs picks the delay, forwarder retries
//!     → Any other failure status: no retry
//! ```
//!
//! # Design Decisions
//! - Only rate limiting and network failures are retryable
//! - Delays double per attempt with no jitter
//! - The retry budget bounds attempts, there is no separate wall-clock cap

pub mod backoff;
