//! # Store Errors
//!
//! Failures reported by a [`UserStore`](super::UserStore). Handlers never show
//! these to clients; they are logged and mapped to a fixed message.

use crate::model::UserId;

/// Errors that can occur inside a store adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store actor has shut down and its mailbox is closed.
    #[error("Store closed")]
    Closed,

    /// The store accepted the request but dropped the reply channel.
    #[error("Store dropped response channel")]
    Dropped,

    /// A mutating call targeted an id with no record.
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// The backing database rejected the call.
    #[error("Database error: {0}")]
    Database(String),
}
