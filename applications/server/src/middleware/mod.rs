/// HTTP middleware
pub mod auth;

pub use auth::{resolve_actor, CurrentActor};
