//! Session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Name of the session cookie set at sign-in.
pub const SESSION_COOKIE: &str = "session_token";

/// Caller identity derived from a validated session token.
///
/// Attached to the request as an extension by [`layer`]; read-only to
/// handlers. This is the only source of `caller` for ownership checks.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Authenticates requests using a session token.
///
/// # Token sources
///
/// 1. `Authorization: Bearer <token>` header
/// 2. `session_token` cookie (browser clients)
///
/// # Authentication Flow
///
/// 1. Extract the token from header or cookie
/// 2. Verify signature and expiry
/// 3. Attach [`CurrentUser`] to the request extensions
/// 4. Continue to the handler
///
/// # Errors
///
/// Returns `401 Unauthorized` when no token is present or verification
/// fails; the handler never runs in that case.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => session_token_from_cookies(&parts.headers),
    };

    let token = token.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({ "reason": "Missing session token" }),
        )
    })?;

    let claims = st.auth_service.verify_session(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        username: claims.username,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Extracts the session token from the `Cookie` header, ignoring other
/// cookies.
fn session_token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}
