//! API route configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::api::handlers::{
    change_activity_handler, check_username_handler, create_link_handler, delete_link_handler,
    list_links_handler, sign_in_handler, sign_up_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Routes reachable without a session.
///
/// # Endpoints
///
/// - `POST /sign-up`               - Register an account
/// - `POST /sign-in`               - Verify credentials, issue a session
/// - `GET  /check-username-unique` - Username availability
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up_handler))
        .route("/sign-in", post(sign_in_handler))
        .route("/check-username-unique", get(check_username_handler))
}

/// Routes requiring a valid session; the middleware attaches the caller
/// identity before any handler runs.
///
/// # Endpoints
///
/// - `POST   /create-stdid`             - Create (or re-fetch) a short link
/// - `GET    /get-links`                - List the caller's links
/// - `PUT    /change-activity/{url_id}` - Toggle a link's active flag
/// - `DELETE /delete-link/{url_id}`     - Delete a link
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create-stdid", post(create_link_handler))
        .route("/get-links", get(list_links_handler))
        .route("/change-activity/{url_id}", put(change_activity_handler))
        .route("/delete-link/{url_id}", delete(delete_link_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
