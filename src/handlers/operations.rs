//! The four user operations.
//!
//! Each follows the same two phases: extract and validate input, then call the
//! store and translate its answer. Update and delete look the record up first
//! so a missing id is reported as not-found instead of as a store failure.

use super::HandlerError;
use crate::framework::RequestContext;
use crate::model::{NewUser, User, UserId, UserInput};
use crate::store::UserStore;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

fn parse_id(request: &RequestContext) -> Result<UserId, HandlerError> {
    request
        .path_id()
        .and_then(|raw| raw.parse().ok())
        .ok_or(HandlerError::NotFound)
}

/// The body must be a JSON object; arrays and scalars are malformed even
/// when their elements would fill the fields positionally.
fn decode_input(request: &RequestContext) -> Result<NewUser, HandlerError> {
    let object: Map<String, Value> = serde_json::from_slice(request.body())?;
    let input: UserInput = serde_json::from_value(Value::Object(object))?;
    Ok(input.into_new_user()?)
}

fn checkpoint(request: &RequestContext) -> Result<(), HandlerError> {
    if request.is_cancelled() {
        return Err(HandlerError::Cancelled);
    }
    Ok(())
}

/// A failed lookup is reported the same way as a missing record.
async fn lookup(
    request: &RequestContext,
    store: &dyn UserStore,
    id: UserId,
) -> Result<User, HandlerError> {
    checkpoint(request)?;
    match store.find_by_id(id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(HandlerError::NotFound),
        Err(e) => {
            warn!(%id, error = %e, "Lookup failed");
            Err(HandlerError::NotFound)
        }
    }
}

/// Reads one user by the `{id}` path parameter.
#[instrument(skip_all, fields(id = request.path_id()))]
pub async fn fetch_by_id(
    request: &RequestContext,
    store: &dyn UserStore,
) -> Result<User, HandlerError> {
    let id = parse_id(request)?;
    lookup(request, store, id).await
}

/// Validates the body and inserts a new user.
#[instrument(skip_all)]
pub async fn create_user(
    request: &RequestContext,
    store: &dyn UserStore,
) -> Result<User, HandlerError> {
    let user = decode_input(request)?;
    debug!(?user, "create_user called");
    checkpoint(request)?;
    store
        .insert(user)
        .await
        .map_err(HandlerError::store("Failed to create resource"))
}

/// Replaces every field of an existing user.
///
/// The body is validated before the existence check, so a malformed body is a
/// client error even for an unknown id.
#[instrument(skip_all, fields(id = request.path_id()))]
pub async fn update_user(
    request: &RequestContext,
    store: &dyn UserStore,
) -> Result<User, HandlerError> {
    let user = decode_input(request)?;
    let id = parse_id(request)?;
    debug!(?user, "update_user called");
    lookup(request, store, id).await?;
    checkpoint(request)?;
    store
        .update_by_id(id, user)
        .await
        .map_err(HandlerError::store("Failed to update resource"))
}

/// Removes an existing user.
#[instrument(skip_all, fields(id = request.path_id()))]
pub async fn delete_user(
    request: &RequestContext,
    store: &dyn UserStore,
) -> Result<(), HandlerError> {
    let id = parse_id(request)?;
    lookup(request, store, id).await?;
    checkpoint(request)?;
    store
        .delete(id)
        .await
        .map_err(HandlerError::store("Failed to delete"))
}
