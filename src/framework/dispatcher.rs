//! # Dispatcher
//!
//! Bridges the request/response boundary to a concurrently running worker.
//!
//! For every call to [`Dispatcher::dispatch`]:
//!
//! 1. An admission permit is taken (if a limit is configured). With none left,
//!    the caller gets `503` and nothing is spawned.
//! 2. A fresh oneshot channel is created for this request alone.
//! 3. One worker task is spawned. It runs the [`Operation`] and sends its single
//!    [`Outcome`] on the channel.
//! 4. The dispatcher awaits that one value, logs the elapsed time and returns it.
//!
//! The reply sender is consumed by `send`, so a worker cannot answer twice, and
//! the dispatcher returns nothing before the worker's answer has arrived.
//!
//! ## Abandoned requests
//!
//! If the dispatch future is dropped (the client disconnected), a drop guard
//! cancels the request's token. The worker sees it at its next store-call
//! boundary and stops; a store call already in progress finishes and its
//! result is discarded. The admission permit lives in the worker, so abandoned
//! work keeps counting against the limit until it actually ends.

use super::{Outcome, RequestContext, Status};
use crate::store::UserStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{oneshot, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// A unit of work the dispatcher can run on a worker.
///
/// Implementations turn a request into exactly one [`Outcome`]; every failure
/// must be resolved into an `Outcome` rather than escaping the worker.
#[async_trait]
pub trait Operation: Send + Sized + 'static {
    /// Short name used in logs and spans.
    fn name(&self) -> &'static str;

    /// Runs the operation against the shared store.
    async fn run(self, request: RequestContext, store: &dyn UserStore) -> Outcome;
}

/// Spawns one worker per request and waits for its single [`Outcome`].
///
/// Cheap to clone; every clone shares the same store handle and admission limit.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn UserStore>,
    admission: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    /// Creates a dispatcher with no admission limit.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            admission: None,
        }
    }

    /// Caps the number of workers alive at once. `0` removes the cap.
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.admission = (limit > 0).then(|| Arc::new(Semaphore::new(limit)));
        self
    }

    /// Remaining admission permits, or `None` when unbounded.
    pub fn available_permits(&self) -> Option<usize> {
        self.admission.as_ref().map(|s| s.available_permits())
    }

    fn admit(&self) -> Result<Option<OwnedSemaphorePermit>, ()> {
        match &self.admission {
            Some(semaphore) => Arc::clone(semaphore)
                .try_acquire_owned()
                .map(Some)
                .map_err(|_| ()),
            None => Ok(None),
        }
    }

    /// Runs `operation` on its own worker and returns the worker's [`Outcome`].
    pub async fn dispatch<O: Operation>(&self, request: RequestContext, operation: O) -> Outcome {
        let op = operation.name();
        let Ok(permit) = self.admit() else {
            warn!(op, "Admission limit reached, rejecting request");
            return Outcome::unavailable();
        };

        let start = Instant::now();
        let cancel = CancellationToken::new();
        // Fires when this future completes or is dropped mid-wait.
        let _abandon = cancel.clone().drop_guard();
        let (reply, rendezvous) = oneshot::channel::<Outcome>();

        let request = request.with_cancellation(cancel);
        let store = Arc::clone(&self.store);
        tokio::spawn(
            async move {
                let _permit = permit;
                let outcome = operation.run(request, store.as_ref()).await;
                if reply.send(outcome).is_err() {
                    debug!("Caller went away, outcome discarded");
                }
            }
            .instrument(info_span!("worker", op)),
        );

        let outcome = match rendezvous.await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(op, "Worker exited without reporting an outcome");
                Outcome::error(Status::InternalError, "Internal server error")
            }
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(op, status = ?outcome.status, elapsed_ms, "Request processed");
        outcome
    }
}
