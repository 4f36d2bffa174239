//! # System Lifecycle
//!
//! Startup and shutdown of the server's long-lived parts.
//!
//! - [`Config`] - command-line and environment settings
//! - [`UserSystem`] - builds the store and dispatcher, stops the store actor
//! - [`tracing`] - log subscriber setup

pub mod config;
pub mod tracing;
mod user_system;

pub use config::Config;
pub use user_system::{SystemError, UserSystem};
