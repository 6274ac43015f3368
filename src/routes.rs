//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{short_id}`          - Short link resolution (public)
//! - `GET /redirect/{short_id}` - Same resolution under an explicit prefix
//! - `GET /health`              - Health check (public)
//! - `/api/*`                   - JSON API; mutating link routes require a session
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Session token (bearer header or cookie)
//!
//! Trailing-slash normalization is applied in `server.rs` so this router
//! stays directly usable in tests.

use axum::{Router, routing::get};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::public_routes().merge(api::routes::protected_routes(state.clone()));

    Router::new()
        .route("/{short_id}", get(redirect_handler))
        .route("/redirect/{short_id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
