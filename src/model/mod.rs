//! Pure data structures: the persisted [`User`] and the request-body types that feed it.

pub mod user;

pub use user::*;
