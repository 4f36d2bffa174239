#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # User Dispatch
//!
//! > **A CRUD server where every request gets its own worker.**
//!
//! This crate serves create, read, update and delete on a single `User`
//! resource over HTTP. Each request is handed to a freshly spawned worker task,
//! which reports exactly one [`Outcome`](framework::Outcome) back over a
//! per-request oneshot channel. The HTTP layer only ever writes that outcome.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a worker per request?
//!
//! - **Isolation**: a panicking or slow operation affects only its own request.
//! - **One answer**: the reply sender is consumed on send, so a request can
//!   never be answered twice, or answered before its work finished.
//! - **Bounded**: an admission semaphore caps the number of live workers and
//!   turns overload into `503` instead of unbounded task growth.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Store adapters report [`StoreError`](store::StoreError); handlers report
//! [`HandlerError`](handlers::HandlerError). Only the conversion into an
//! `Outcome` decides what the client sees, so internal error text never leaks.
//!
//! ### 2. Explicit Store Injection
//! The store is built once at startup and passed down as an
//! `Arc<dyn UserStore>`. There is no global; tests swap in
//! [`MockStore`](store::mock::MockStore).
//!
//! ### 3. Concurrency Model
//! Workers run concurrently. The default in-memory store is an actor that owns
//! the table and processes requests one at a time, so no lock guards the data.
//!
//! ### 4. Observability
//! `tracing` everywhere, with a span per worker and one timed log line per
//! request. See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: spawn a worker, await its single outcome, enforce admission.
//! - **Key items**: [`Dispatcher`](framework::Dispatcher), [`Operation`](framework::Operation), [`Outcome`](framework::Outcome).
//!
//! ### 2. The Work ([`handlers`])
//! - **Role**: validate input and call the store for each of the four operations.
//! - **Key items**: [`UserOperation`](handlers::UserOperation), [`HandlerError`](handlers::HandlerError).
//!
//! ### 3. The Data ([`model`], [`store`])
//! - **Role**: the `User` record, its validated input, and the persistence boundary.
//! - **Key items**: [`User`](model::User), [`UserInput`](model::UserInput), [`UserStore`](store::UserStore), [`StoreActor`](store::StoreActor).
//!
//! ### 4. The Edges ([`http`], [`lifecycle`])
//! - **Role**: axum routes, configuration, startup and graceful shutdown.
//! - **Key items**: [`router`](http::router), [`Config`](lifecycle::Config), [`UserSystem`](lifecycle::UserSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --bind 127.0.0.1:8080
//! curl -X POST localhost:8080/users -d '{"name":"Alice","email":"alice@example.com","age":30}'
//! curl localhost:8080/users/1
//! ```
//!
//! With `--features postgres`, pass `--database-url` (or set `DATABASE_URL`)
//! to persist users in PostgreSQL instead of memory.

pub mod framework;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod store;
