use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{AuthService, LinkService};

/// Shared application state injected into all handlers.
///
/// The pool is the process-wide persistence handle, created once at startup
/// and reused for every request.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub db: PgPool,
}
