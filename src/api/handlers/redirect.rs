//! Handler for short link resolution.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::counter;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::pages::{ExpiredPage, InactivePage, NotFoundPage};
use crate::state::AppState;

/// Resolves a short identifier to a redirect or a rendered status page.
///
/// # Endpoint
///
/// `GET /{short_id}` and `GET /redirect/{short_id}`
///
/// # Outcomes
///
/// Evaluated in fixed order by the link service:
///
/// 1. unknown identifier → 404 with a rendered not-found page
/// 2. expired → the record is deactivated, 410 with a rendered expired page
/// 3. deactivated by owner → 403 with a rendered "contact owner" page
/// 4. active and unexpired → `302 Found` to the destination URL
///
/// # Errors
///
/// Returns 500 only on persistence failure; every lifecycle outcome is a
/// page, not a JSON error.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let outcome = state.link_service.resolve(&short_id).await?;

    let label = outcome_label(&outcome);
    counter!("snaplink_resolutions_total", "outcome" => label).increment(1);

    let response = match outcome {
        Resolution::Redirect(destination) => {
            tracing::debug!(%short_id, "Redirecting");
            (StatusCode::FOUND, [(header::LOCATION, destination)]).into_response()
        }
        Resolution::NotFound => {
            (StatusCode::NOT_FOUND, NotFoundPage { short_id }).into_response()
        }
        Resolution::Expired => {
            tracing::info!(%short_id, "Expired link downgraded");
            (StatusCode::GONE, ExpiredPage { short_id }).into_response()
        }
        Resolution::Inactive => {
            (StatusCode::FORBIDDEN, InactivePage { short_id }).into_response()
        }
    };

    Ok(response)
}

fn outcome_label(outcome: &Resolution) -> &'static str {
    match outcome {
        Resolution::Redirect(_) => "redirect",
        Resolution::NotFound => "not_found",
        Resolution::Expired => "expired",
        Resolution::Inactive => "inactive",
    }
}
