//! # Logging
//!
//! Structured logs through `tracing`. The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run            # one line per write, plus HTTP requests
//! RUST_LOG=debug cargo run           # request payloads and every actor message
//! RUST_LOG=storefront=debug,tower_http=info cargo run
//! ```
//!
//! Lines are compact and carry no module path. Records are named by their typed ids
//! (`area_id="area_1"`), so the target adds little.

/// Installs the global subscriber. Call once, before the system starts.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
