//! # Request Context
//!
//! Everything a worker knows about the request it serves: the raw path
//! identifier, the raw body, and the cancellation token the dispatcher fires
//! when the caller goes away.

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// Per-request input handed to an [`Operation`](super::Operation).
///
/// Decoding and validation are left to the operation, so a malformed request
/// still produces an ordinary `Outcome` from inside the worker.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    path_id: Option<String>,
    body: Bytes,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `{id}` path parameter.
    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_id = Some(id.into());
        self
    }

    /// Sets the raw request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn path_id(&self) -> Option<&str> {
        self.path_id.as_deref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// True once the caller has stopped waiting for this request.
    ///
    /// Operations check this before every store call.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
