//! Handlers for link management (create, list, toggle, delete).
//!
//! All routes here sit behind the session middleware; the caller identity
//! arrives as a [`CurrentUser`] extension and every operation is scoped to
//! it.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use metrics::counter;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the existing one for an already
/// shortened destination.
///
/// # Endpoint
///
/// `POST /api/create-stdid`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "expires_at": "2027-01-01T00:00:00Z"   // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid destination or a past expiry,
/// 401 without a session, 500 on persistence failure.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.original_url, payload.expires_at, caller.id)
        .await?;

    counter!("snaplink_links_created_total").increment(1);
    tracing::info!(short_id = %link.short_id, user_id = caller.id, "Short link ready");

    Ok(Json(link.into()))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/get-links`
///
/// # Errors
///
/// Returns 404 Not Found when the caller owns no links, matching the
/// boundary's reporting of an empty set.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.links_for_user(caller.id).await?;

    if links.is_empty() {
        return Err(AppError::not_found(
            "No links found",
            serde_json::json!({}),
        ));
    }

    Ok(Json(LinkListResponse {
        links: links.into_iter().map(Into::into).collect(),
    }))
}

/// Flips the active flag on a caller-owned link.
///
/// # Endpoint
///
/// `PUT /api/change-activity/{url_id}`
///
/// The flip ignores expiration: reactivating an expired link succeeds, but
/// resolution still blocks it on the expiry gate.
///
/// # Errors
///
/// Returns 404 Not Found both for a missing link and for someone else's
/// link; the two are indistinguishable by design.
pub async fn change_activity_handler(
    Path(url_id): Path<i64>,
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.toggle_active(url_id, caller.id).await?;

    tracing::info!(
        short_id = %link.short_id,
        is_active = link.is_active,
        "Link activity toggled"
    );

    Ok(Json(link.into()))
}

/// Permanently deletes a caller-owned link.
///
/// # Endpoint
///
/// `DELETE /api/delete-link/{url_id}`
///
/// Irreversible; the deleted record is echoed back.
///
/// # Errors
///
/// Same merged 404 as [`change_activity_handler`].
pub async fn delete_link_handler(
    Path(url_id): Path<i64>,
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.delete_link(url_id, caller.id).await?;

    tracing::info!(short_id = %link.short_id, "Link deleted");

    Ok(Json(link.into()))
}
