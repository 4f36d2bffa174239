//! # Outcome Envelope
//!
//! The single value a worker hands back to the dispatcher: a status
//! classification plus the JSON payload to render. Axum renders it directly
//! through [`IntoResponse`].

use crate::model::{User, ValidationFailure};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

/// Status classification of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    BadRequest,
    InternalError,
    /// Produced by the dispatcher's admission limit, never by a handler.
    Unavailable,
}

impl Status {
    /// The HTTP status code this classification renders as.
    pub const fn code(self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::OK,
            Status::NotFound => StatusCode::NOT_FOUND,
            Status::BadRequest => StatusCode::BAD_REQUEST,
            Status::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Status::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error response body: `{"error": "..."}`, plus the failing fields for a
/// validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// What an [`Outcome`] carries back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    User(User),
    Error(ErrorBody),
    /// Plain acknowledgement, rendered as a JSON string.
    Ack(&'static str),
}

/// The result of one dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub payload: Payload,
}

impl Outcome {
    pub fn ok(user: User) -> Self {
        Self {
            status: Status::Ok,
            payload: Payload::User(user),
        }
    }

    pub fn ack() -> Self {
        Self {
            status: Status::Ok,
            payload: Payload::Ack("ok"),
        }
    }

    pub fn error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: Payload::Error(ErrorBody {
                error: message.into(),
                fields: None,
            }),
        }
    }

    pub fn invalid(failure: ValidationFailure) -> Self {
        Self {
            status: Status::BadRequest,
            payload: Payload::Error(ErrorBody {
                error: failure.to_string(),
                fields: Some(failure.fields),
            }),
        }
    }

    pub fn not_found() -> Self {
        Self::error(Status::NotFound, "Item not found")
    }

    pub fn unavailable() -> Self {
        Self::error(Status::Unavailable, "Server busy")
    }

    /// The user carried by a successful outcome, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.payload {
            Payload::User(user) => Some(user),
            _ => None,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status.code(), Json(self.payload)).into_response()
    }
}
