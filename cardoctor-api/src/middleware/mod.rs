pub mod auth;

pub use auth::{require_owner, require_session, OwnerScope};
