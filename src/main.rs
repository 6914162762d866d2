//! RAWG gateway binary.
//!
//! ```text
//! Client ──▶ request id ─▶ trace ─▶ [cors] ─▶ API key gate ─▶ route handler
//!                                                               │
//!                                         Forwarder (retry on 429/network)
//!                                                               │
//!                                                               ▼
//!                                                        RAWG upstream
//! ```

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rawg_gateway::lifecycle::startup::run().await?;
    Ok(())
}
