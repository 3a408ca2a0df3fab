//! # Observability & Tracing
//!
//! Every remote operation runs inside a span named after its verb (`fetch`, `save`,
//! `destroy`) carrying `resource_name` and `url`; collection operations add an outer
//! `fanout` span with the verb and member count.
//!
//! ## What Gets Logged
//!
//! - `DEBUG` when a request is dispatched
//! - `INFO` on completion (`Fetched merged=2`, `Saved`, `Destroyed`, `Fanout complete`)
//! - `WARN` for configuration errors, transport failures and undecodable responses
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a fetch followed by a collection destroy looks like:
//!
//! ```text
//! INFO fetch{resource_name=user url=users/1}: Fetched merged=2
//! INFO fanout{verb=destroy models=2}:destroy{resource_name=user url=users/1}: Destroyed
//! INFO fanout{verb=destroy models=2}:destroy{resource_name=user url=users/2}: Destroyed
//! INFO fanout{verb=destroy models=2}: Fanout complete succeeded=2 failed=0
//! ```

/// Initializes the global subscriber with `RUST_LOG` filtering and compact output.
///
/// Call once, at application start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
