//! # Mock Store
//!
//! `MockStore` implements [`UserStore`] from a queue of expectations instead of
//! real state. It makes store failures trivial to inject, which a real backend
//! cannot do on demand.
//!
//! | Feature | MockStore | StoreActor |
//! |---------|-----------|------------|
//! | **State** | None (scripted replies) | Real table |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Use Case** | Handler error paths | End-to-end flows |
//!
//! ```rust
//! use user_dispatch::store::mock::{MockStore, StoreCall};
//! use user_dispatch::store::{StoreError, UserStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStore::new();
//!     mock.expect_find(1).return_err(StoreError::Database("timeout".into()));
//!
//!     let result = mock.find_by_id(1).await;
//!     assert!(matches!(result, Err(StoreError::Database(_))));
//!     assert_eq!(mock.calls(), vec![StoreCall::Find(1)]);
//!     mock.verify();
//! }
//! ```
//!
//! A call with no matching expectation answers `StoreError::Database` and is
//! remembered; [`MockStore::verify`] then fails the test.

use super::{StoreError, UserStore};
use crate::model::{NewUser, User, UserId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A store call as observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Find(UserId),
    Insert(NewUser),
    Update(UserId, NewUser),
    Delete(UserId),
}

enum Expectation {
    Find {
        id: UserId,
        response: Result<Option<User>, StoreError>,
    },
    Insert {
        response: Result<User, StoreError>,
    },
    Update {
        id: UserId,
        response: Result<User, StoreError>,
    },
    Delete {
        id: UserId,
        response: Result<(), StoreError>,
    },
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<StoreCall>,
    unexpected: Vec<StoreCall>,
}

/// A scripted [`UserStore`] for tests.
///
/// Cloning shares the script, so a test can keep one handle for setup and
/// verification while the dispatcher owns another.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Expects a `find_by_id` call.
    pub fn expect_find(&self, id: UserId) -> FindExpectationBuilder {
        FindExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Expects an `insert` call.
    pub fn expect_insert(&self) -> InsertExpectationBuilder {
        InsertExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects an `update_by_id` call.
    pub fn expect_update(&self, id: UserId) -> UpdateExpectationBuilder {
        UpdateExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Expects a `delete` call.
    pub fn expect_delete(&self, id: UserId) -> DeleteExpectationBuilder {
        DeleteExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.lock();
        assert!(
            state.unexpected.is_empty(),
            "Unexpected store calls: {:?}",
            state.unexpected
        );
        assert!(
            state.expectations.is_empty(),
            "Not all expectations were met. {} remaining",
            state.expectations.len()
        );
    }

    fn record(&self, call: StoreCall) -> Option<Expectation> {
        let mut state = self.lock();
        state.calls.push(call.clone());
        let matches = match (&call, state.expectations.front()) {
            (StoreCall::Find(got), Some(Expectation::Find { id, .. })) => got == id,
            (StoreCall::Insert(_), Some(Expectation::Insert { .. })) => true,
            (StoreCall::Update(got, _), Some(Expectation::Update { id, .. })) => got == id,
            (StoreCall::Delete(got), Some(Expectation::Delete { id, .. })) => got == id,
            _ => false,
        };
        if matches {
            state.expectations.pop_front()
        } else {
            state.unexpected.push(call);
            None
        }
    }
}

fn unexpected<T>() -> Result<T, StoreError> {
    Err(StoreError::Database("unexpected call to mock store".to_string()))
}

#[async_trait]
impl UserStore for MockStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        match self.record(StoreCall::Find(id)) {
            Some(Expectation::Find { response, .. }) => response,
            _ => unexpected(),
        }
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        match self.record(StoreCall::Insert(user)) {
            Some(Expectation::Insert { response }) => response,
            _ => unexpected(),
        }
    }

    async fn update_by_id(&self, id: UserId, user: NewUser) -> Result<User, StoreError> {
        match self.record(StoreCall::Update(id, user)) {
            Some(Expectation::Update { response, .. }) => response,
            _ => unexpected(),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        match self.record(StoreCall::Delete(id)) {
            Some(Expectation::Delete { response, .. }) => response,
            _ => unexpected(),
        }
    }
}

fn push(state: &Mutex<MockState>, expectation: Expectation) {
    state
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .expectations
        .push_back(expectation);
}

/// Builder for `find_by_id` expectations.
pub struct FindExpectationBuilder {
    id: UserId,
    state: Arc<Mutex<MockState>>,
}

impl FindExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<User>) {
        push(&self.state, Expectation::Find {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        push(&self.state, Expectation::Find {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder {
    state: Arc<Mutex<MockState>>,
}

impl InsertExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, user: User) {
        push(&self.state, Expectation::Insert { response: Ok(user) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        push(&self.state, Expectation::Insert {
            response: Err(error),
        });
    }
}

/// Builder for `update_by_id` expectations.
pub struct UpdateExpectationBuilder {
    id: UserId,
    state: Arc<Mutex<MockState>>,
}

impl UpdateExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, user: User) {
        push(&self.state, Expectation::Update {
            id: self.id,
            response: Ok(user),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        push(&self.state, Expectation::Update {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder {
    id: UserId,
    state: Arc<Mutex<MockState>>,
}

impl DeleteExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        push(&self.state, Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        push(&self.state, Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}
