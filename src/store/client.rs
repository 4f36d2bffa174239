//! # Store Client
//!
//! The cloneable handle to a [`StoreActor`](super::StoreActor). It is the
//! [`UserStore`] implementation the dispatcher's workers call by default.

use super::{Response, StoreError, StoreRequest, UserStore};
use crate::model::{NewUser, User, UserId};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A [`UserStore`] that forwards every call to a `StoreActor`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **One reply per call** – each request carries a fresh oneshot sender.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[async_trait]
impl UserStore for StoreClient {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.request(|respond_to| StoreRequest::Find { id, respond_to })
            .await
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        self.request(|respond_to| StoreRequest::Insert { user, respond_to })
            .await
    }

    async fn update_by_id(&self, id: UserId, user: NewUser) -> Result<User, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            user,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }
}
