//! Per-request dispatch: the concurrency core of the server.
//!
//! This module decouples *doing the work* from *answering the caller*. Each
//! request runs on its own worker task and reports back exactly once.
//!
//! # Main Components
//!
//! - [`Dispatcher`] - Spawns one worker per request and awaits its single result
//! - [`Operation`] - Trait for the work a worker performs
//! - [`Outcome`] - Status + payload envelope, the only thing a worker sends back
//! - [`RequestContext`] - Raw path id, body, and cancellation state of a request

pub mod context;
pub mod dispatcher;
pub mod outcome;

pub use context::RequestContext;
pub use dispatcher::{Dispatcher, Operation};
pub use outcome::{ErrorBody, Outcome, Payload, Status};
