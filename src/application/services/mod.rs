//! Application services orchestrating domain logic.

mod auth_service;
mod link_service;

pub use auth_service::{AuthService, SessionClaims};
pub use link_service::{LinkService, Resolution};
