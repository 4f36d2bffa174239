//! # Store Messages
//!
//! The requests a [`StoreClient`](super::StoreClient) sends to the
//! [`StoreActor`](super::StoreActor), one variant per store operation.

use super::StoreError;
use crate::model::{NewUser, User, UserId};
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store actor.
///
/// The variants map onto the four [`UserStore`](super::UserStore) calls. Each
/// one carries its own reply sender, so the actor answers exactly the caller
/// that asked.
#[derive(Debug)]
pub enum StoreRequest {
    Find {
        id: UserId,
        respond_to: Response<Option<User>>,
    },
    Insert {
        user: NewUser,
        respond_to: Response<User>,
    },
    Update {
        id: UserId,
        user: NewUser,
        respond_to: Response<User>,
    },
    Delete {
        id: UserId,
        respond_to: Response<()>,
    },
}
