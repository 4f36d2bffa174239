//! # User Operation Handlers
//!
//! The request-to-outcome functions the dispatcher runs on its workers, one per
//! HTTP route.
//!
//! ## Structure
//!
//! - [`operations`] - `fetch_by_id`, `create_user`, `update_user`, `delete_user`
//! - [`error`] - [`HandlerError`] and its mapping onto an [`Outcome`]
//! - [`UserOperation`] - the [`Operation`] the HTTP layer hands to the dispatcher
//!
//! ## Outcomes
//!
//! | Operation | Success | Failures |
//! |-----------|---------|----------|
//! | `FetchById` | 200, user | 404 |
//! | `Create` | 200, created user | 400, 500 |
//! | `Update` | 200, updated user | 400, 404, 500 |
//! | `Delete` | 200, `"ok"` | 404, 500 |
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use user_dispatch::framework::{Dispatcher, RequestContext, Status};
//! use user_dispatch::handlers::UserOperation;
//! use user_dispatch::store::StoreActor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(8);
//!     tokio::spawn(actor.run());
//!     let dispatcher = Dispatcher::new(Arc::new(client));
//!
//!     let body = r#"{"name":"Alice","email":"alice@example.com","age":30}"#;
//!     let created = dispatcher
//!         .dispatch(RequestContext::new().with_body(body), UserOperation::Create)
//!         .await;
//!     assert_eq!(created.status, Status::Ok);
//! }
//! ```

pub mod error;
pub mod operations;

pub use error::*;

use crate::framework::{Operation, Outcome, RequestContext};
use crate::store::UserStore;
use async_trait::async_trait;

/// The operation selected by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    FetchById,
    Create,
    Update,
    Delete,
}

#[async_trait]
impl Operation for UserOperation {
    fn name(&self) -> &'static str {
        match self {
            UserOperation::FetchById => "fetch_by_id",
            UserOperation::Create => "create_user",
            UserOperation::Update => "update_user",
            UserOperation::Delete => "delete_user",
        }
    }

    async fn run(self, request: RequestContext, store: &dyn UserStore) -> Outcome {
        let result = match self {
            UserOperation::FetchById => operations::fetch_by_id(&request, store)
                .await
                .map(Outcome::ok),
            UserOperation::Create => operations::create_user(&request, store)
                .await
                .map(Outcome::ok),
            UserOperation::Update => operations::update_user(&request, store)
                .await
                .map(Outcome::ok),
            UserOperation::Delete => operations::delete_user(&request, store)
                .await
                .map(|()| Outcome::ack()),
        };
        result.unwrap_or_else(Outcome::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Payload, Status};
    use crate::model::NewUser;
    use crate::store::mock::{MockStore, StoreCall};
    use crate::store::StoreError;

    const JOHN: &str = r#"{"name":"John","email":"email@email.com","age":33}"#;

    fn john() -> NewUser {
        NewUser::new("John", "email@email.com", 33)
    }

    async fn run(op: UserOperation, request: RequestContext, store: &MockStore) -> Outcome {
        op.run(request, store).await
    }

    fn error_message(outcome: &Outcome) -> &str {
        match &outcome.payload {
            Payload::Error(body) => body.error.as_str(),
            other => panic!("expected an error payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_found() {
        let store = MockStore::new();
        store.expect_find(1).return_ok(Some(john().with_id(1)));

        let outcome = run(
            UserOperation::FetchById,
            RequestContext::new().with_path_id("1"),
            &store,
        )
        .await;
        assert_eq!(outcome, Outcome::ok(john().with_id(1)));
        store.verify();
    }

    #[tokio::test]
    async fn test_fetch_lookup_failure_is_not_found() {
        let store = MockStore::new();
        store
            .expect_find(1)
            .return_err(StoreError::Database("down".into()));

        let outcome = run(
            UserOperation::FetchById,
            RequestContext::new().with_path_id("1"),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::NotFound);
        assert_eq!(error_message(&outcome), "Item not found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_never_reaches_store() {
        let store = MockStore::new();
        for op in [
            UserOperation::FetchById,
            UserOperation::Update,
            UserOperation::Delete,
        ] {
            let request = RequestContext::new().with_path_id("abc").with_body(JOHN);
            assert_eq!(run(op, request, &store).await.status, Status::NotFound);
        }
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_validation_happens_before_store() {
        let store = MockStore::new();
        let request = RequestContext::new().with_body(r#"{"name":"John","age":33}"#);

        let outcome = run(UserOperation::Create, request, &store).await;
        assert_eq!(outcome.status, Status::BadRequest);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_body_is_malformed() {
        let store = MockStore::new();
        for body in [r#"["John","email@email.com",33]"#, "42", r#""John""#, "null"] {
            let request = RequestContext::new().with_body(body);
            let outcome = run(UserOperation::Create, request, &store).await;
            assert_eq!(outcome.status, Status::BadRequest, "body {body}");
            assert!(error_message(&outcome).starts_with("Malformed request body"));
        }
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_insert_failure_is_internal_error() {
        let store = MockStore::new();
        store
            .expect_insert()
            .return_err(StoreError::Database("disk full".into()));

        let outcome = run(
            UserOperation::Create,
            RequestContext::new().with_body(JOHN),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::InternalError);
        assert_eq!(error_message(&outcome), "Failed to create resource");
        assert_eq!(store.calls(), vec![StoreCall::Insert(john())]);
    }

    #[tokio::test]
    async fn test_update_missing_id_skips_update_call() {
        let store = MockStore::new();
        store.expect_find(0).return_ok(None);

        let outcome = run(
            UserOperation::Update,
            RequestContext::new().with_path_id("0").with_body(JOHN),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::NotFound);
        assert_eq!(store.calls(), vec![StoreCall::Find(0)]);
        store.verify();
    }

    #[tokio::test]
    async fn test_update_invalid_body_is_bad_request_even_for_missing_id() {
        let store = MockStore::new();
        let outcome = run(
            UserOperation::Update,
            RequestContext::new().with_path_id("0").with_body(r#"{"age":"old"}"#),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::BadRequest);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_is_internal_error() {
        let store = MockStore::new();
        store.expect_find(2).return_ok(Some(john().with_id(2)));
        store
            .expect_update(2)
            .return_err(StoreError::Database("deadlock".into()));

        let outcome = run(
            UserOperation::Update,
            RequestContext::new().with_path_id("2").with_body(JOHN),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::InternalError);
        assert_eq!(error_message(&outcome), "Failed to update resource");
        store.verify();
    }

    #[tokio::test]
    async fn test_update_returns_stored_record() {
        let store = MockStore::new();
        store.expect_find(2).return_ok(Some(john().with_id(2)));
        let replaced = NewUser::new("Jane", "jane@example.com", 40);
        store.expect_update(2).return_ok(replaced.clone().with_id(2));

        let body = r#"{"name":"Jane","email":"jane@example.com","age":40}"#;
        let outcome = run(
            UserOperation::Update,
            RequestContext::new().with_path_id("2").with_body(body),
            &store,
        )
        .await;
        assert_eq!(outcome, Outcome::ok(replaced.clone().with_id(2)));
        assert_eq!(
            store.calls(),
            vec![StoreCall::Find(2), StoreCall::Update(2, replaced)]
        );
    }

    #[tokio::test]
    async fn test_delete_acknowledges() {
        let store = MockStore::new();
        store.expect_find(3).return_ok(Some(john().with_id(3)));
        store.expect_delete(3).return_ok();

        let outcome = run(
            UserOperation::Delete,
            RequestContext::new().with_path_id("3"),
            &store,
        )
        .await;
        assert_eq!(outcome, Outcome::ack());
        store.verify();
    }

    #[tokio::test]
    async fn test_delete_failure_is_internal_error() {
        let store = MockStore::new();
        store.expect_find(3).return_ok(Some(john().with_id(3)));
        store
            .expect_delete(3)
            .return_err(StoreError::Database("locked".into()));

        let outcome = run(
            UserOperation::Delete,
            RequestContext::new().with_path_id("3"),
            &store,
        )
        .await;
        assert_eq!(outcome.status, Status::InternalError);
        assert_eq!(error_message(&outcome), "Failed to delete");
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(UserOperation::FetchById.name(), "fetch_by_id");
        assert_eq!(UserOperation::Delete.name(), "delete_user");
    }
}
