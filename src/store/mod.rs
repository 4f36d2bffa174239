//! # Resource Store Adapter
//!
//! The [`UserStore`] trait is the only way handlers touch persisted state.
//! One instance is built at startup and shared by every worker as an
//! `Arc<dyn UserStore>`; concurrent access safety is the implementation's job.
//!
//! ## Implementations
//!
//! - [`StoreActor`] / [`StoreClient`] - in-memory table owned by a single actor task (default).
//! - `PostgresStore` - sqlx-backed table, behind the `postgres` feature.
//! - [`mock::MockStore`] - expectation-driven store for failure-injection tests.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use crate::model::{NewUser, User, UserId};
use async_trait::async_trait;

/// Persistent lookup, insert, update and delete of [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Looks up a record. `Ok(None)` means no record has this id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Persists a new record and returns it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Replaces every field of an existing record and returns the stored result.
    async fn update_by_id(&self, id: UserId, user: NewUser) -> Result<User, StoreError>;

    /// Removes a record.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}
