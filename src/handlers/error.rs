//! Error types for the user operation handlers.

use crate::framework::{Outcome, Status};
use crate::model::ValidationFailure;
use crate::store::StoreError;
use thiserror::Error;
use tracing::{debug, error};

/// Everything that can stop a handler short of success.
///
/// Handlers resolve these locally; the worker only ever sends the
/// [`Outcome`] they convert into.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The id does not parse or no record has it.
    #[error("Item not found")]
    NotFound,

    /// The body decoded but failed field validation.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    /// The body is not a JSON object of the expected shape.
    #[error("Malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A store call failed after input and existence checks passed.
    /// Only `message` reaches the client.
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// The caller stopped waiting before the store was touched.
    #[error("Request cancelled")]
    Cancelled,
}

impl HandlerError {
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| HandlerError::Store { message, source }
    }
}

impl From<HandlerError> for Outcome {
    fn from(e: HandlerError) -> Self {
        match e {
            HandlerError::NotFound => Outcome::not_found(),
            HandlerError::Invalid(failure) => Outcome::invalid(failure),
            HandlerError::Malformed(_) => Outcome::error(Status::BadRequest, e.to_string()),
            HandlerError::Store { message, source } => {
                error!(error = %source, message, "Store call failed");
                Outcome::error(Status::InternalError, message)
            }
            HandlerError::Cancelled => {
                debug!("Worker stopped before store call");
                Outcome::error(Status::InternalError, e.to_string())
            }
        }
    }
}
