//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! A compact format that hides the crate/module prefix (`with_target(false)`),
//! filtered by the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **HTTP**: one span per request from `tower_http`'s `TraceLayer`
//! - **Dispatch**: a `worker{op=...}` span around each worker, and one
//!   `Request processed` line per request with `status` and `elapsed_ms`
//! - **Store**: actor startup and shutdown, plus per-operation lines tagged
//!   with `entity_type`
//! - **Errors**: store failures at `error`, failed lookups at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # One line per request
//! RUST_LOG=info cargo run
//!
//! # Decoded request bodies and store traffic
//! RUST_LOG=debug cargo run
//!
//! # Only the dispatcher
//! RUST_LOG=user_dispatch::framework=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a create request looks like:
//!
//! ```text
//! INFO worker:create_user: Created entity_type="User" id=1 size=1
//! INFO Request processed op="create_user" status=Ok elapsed_ms=0.41
//! ```
//!
//! With `RUST_LOG=debug` the handler also logs its decoded input once at entry:
//!
//! ```text
//! DEBUG worker:create_user: create_user called user=NewUser { name: "Alice", ... }
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
