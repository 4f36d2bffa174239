//! # HTTP Surface
//!
//! Axum routes for the user resource. Every handler does the same thing:
//! wrap the path id and body in a [`RequestContext`], pick a
//! [`UserOperation`], and return whatever [`Outcome`] the dispatcher produces.
//!
//! Routes are mounted under `/users` and, as an alias, `/resources`:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/users/{id}` | [`UserOperation::FetchById`] |
//! | POST | `/users` | [`UserOperation::Create`] |
//! | PUT | `/users/{id}` | [`UserOperation::Update`] |
//! | DELETE | `/users/{id}` | [`UserOperation::Delete`] |

use crate::framework::{Dispatcher, Outcome, RequestContext};
use crate::handlers::UserOperation;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use tower_http::trace::TraceLayer;

/// Path prefixes the user routes are served under.
pub const ROUTE_PREFIXES: [&str; 2] = ["/users", "/resources"];

/// Builds the application router around a dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    let mut router: Router<Dispatcher> = Router::new();
    for prefix in ROUTE_PREFIXES {
        router = router.route(prefix, post(create_user)).route(
            &format!("{prefix}/{{id}}"),
            get(fetch_user).put(update_user).delete(delete_user),
        );
    }
    router
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn fetch_user(State(dispatcher): State<Dispatcher>, Path(id): Path<String>) -> Outcome {
    let request = RequestContext::new().with_path_id(id);
    dispatcher.dispatch(request, UserOperation::FetchById).await
}

async fn create_user(State(dispatcher): State<Dispatcher>, body: Bytes) -> Outcome {
    let request = RequestContext::new().with_body(body);
    dispatcher.dispatch(request, UserOperation::Create).await
}

async fn update_user(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<String>,
    body: Bytes,
) -> Outcome {
    let request = RequestContext::new().with_path_id(id).with_body(body);
    dispatcher.dispatch(request, UserOperation::Update).await
}

async fn delete_user(State(dispatcher): State<Dispatcher>, Path(id): Path<String>) -> Outcome {
    let request = RequestContext::new().with_path_id(id);
    dispatcher.dispatch(request, UserOperation::Delete).await
}
