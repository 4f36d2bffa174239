//! # In-Memory Store Actor
//!
//! This module defines the `StoreActor`, the default [`UserStore`](super::UserStore)
//! backend. It owns the user table and processes [`StoreRequest`]s one at a time,
//! so concurrent workers never race on the table and no lock is needed.

use super::{StoreClient, StoreError, StoreRequest};
use crate::model::{User, UserId};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const ENTITY_TYPE: &str = "User";

/// The actor that owns every persisted [`User`].
///
/// # Architecture Note
/// This struct is the "Server" half of the in-memory store. It owns the table
/// and the receiver end of the mailbox. All dispatcher workers share cloned
/// [`StoreClient`]s; the actor serializes their requests.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` and its `client`.
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Hand the client to the dispatcher as an `Arc<dyn UserStore>`.
///
/// ```rust
/// use user_dispatch::model::NewUser;
/// use user_dispatch::store::{StoreActor, UserStore};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(8);
///     tokio::spawn(actor.run());
///
///     let user = client.insert(NewUser::new("Alice", "alice@example.com", 30)).await.unwrap();
///     assert_eq!(user.id, 1);
/// }
/// ```
///
/// Ids start at 1 and are never reused, even after a delete.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    users: HashMap<UserId, User>,
    next_id: UserId,
}

impl StoreActor {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the mailbox. If the mailbox is full,
    ///   callers wait until there is space. `0` is raised to `1`.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            users: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(entity_type = ENTITY_TYPE, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Find { id, respond_to } => {
                    let user = self.users.get(&id).cloned();
                    debug!(entity_type = ENTITY_TYPE, %id, found = user.is_some(), "Find");
                    let _ = respond_to.send(Ok(user));
                }
                StoreRequest::Insert { user, respond_to } => {
                    debug!(entity_type = ENTITY_TYPE, ?user, "Insert");
                    let id = self.next_id;
                    self.next_id += 1;
                    let user = user.with_id(id);
                    self.users.insert(id, user.clone());
                    info!(entity_type = ENTITY_TYPE, %id, size = self.users.len(), "Created");
                    let _ = respond_to.send(Ok(user));
                }
                StoreRequest::Update {
                    id,
                    user,
                    respond_to,
                } => {
                    debug!(entity_type = ENTITY_TYPE, %id, ?user, "Update");
                    if let Some(stored) = self.users.get_mut(&id) {
                        *stored = user.with_id(id);
                        info!(entity_type = ENTITY_TYPE, %id, "Updated");
                        let _ = respond_to.send(Ok(stored.clone()));
                    } else {
                        warn!(entity_type = ENTITY_TYPE, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type = ENTITY_TYPE, %id, "Delete");
                    if self.users.remove(&id).is_some() {
                        info!(entity_type = ENTITY_TYPE, %id, size = self.users.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type = ENTITY_TYPE, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                    }
                }
            }
        }

        info!(entity_type = ENTITY_TYPE, size = self.users.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewUser;
    use crate::store::UserStore;

    #[tokio::test]
    async fn test_zero_buffer_is_usable() {
        let (actor, client) = StoreActor::new(0);
        tokio::spawn(actor.run());

        let created = client
            .insert(NewUser::new("Alice", "alice@example.com", 30))
            .await
            .unwrap();
        assert_eq!(client.find_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_store_full_lifecycle() {
        let (actor, client) = StoreActor::new(10);
        tokio::spawn(actor.run());

        // 1. Insert
        let created = client
            .insert(NewUser::new("Alice", "alice@example.com", 30))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        // 2. Find
        let found = client.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        // 3. Update replaces every field but the id
        let updated = client
            .update_by_id(created.id, NewUser::new("Bob", "bob@example.com", 41))
            .await
            .unwrap();
        assert_eq!(updated, NewUser::new("Bob", "bob@example.com", 41).with_id(1));
        assert_eq!(client.find_by_id(1).await.unwrap(), Some(updated));

        // 4. Delete
        client.delete(1).await.unwrap();
        assert_eq!(client.find_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let (actor, client) = StoreActor::new(10);
        tokio::spawn(actor.run());

        let first = client.insert(NewUser::new("A", "a@x", 1)).await.unwrap();
        client.delete(first.id).await.unwrap();
        let second = client.insert(NewUser::new("B", "b@x", 2)).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_mutating_missing_id_is_not_found() {
        let (actor, client) = StoreActor::new(10);
        tokio::spawn(actor.run());

        let update = client.update_by_id(5, NewUser::new("A", "a@x", 1)).await;
        assert_eq!(update, Err(StoreError::NotFound(5)));
        assert_eq!(client.delete(5).await, Err(StoreError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_actor_stops_when_clients_dropped() {
        let (actor, client) = StoreActor::new(10);
        let handle = tokio::spawn(actor.run());
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_store_reports_closed() {
        let (actor, client) = StoreActor::new(10);
        drop(actor);
        assert_eq!(client.find_by_id(1).await, Err(StoreError::Closed));
    }
}
