//! Handlers for sign-up, sign-in, and username availability.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::auth::{
    AvailabilityResponse, SessionResponse, SignInRequest, SignUpRequest, UsernameQuery,
    UserResponse,
};
use crate::api::middleware::auth::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/sign-up`
///
/// # Errors
///
/// Returns 400 Bad Request when the payload fails validation or the
/// username/email is already taken; neither case creates a record.
pub async fn sign_up_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .sign_up(&payload.username, &payload.email, &payload.password)
        .await?;

    tracing::info!(username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Verifies credentials and issues a session.
///
/// # Endpoint
///
/// `POST /api/sign-in`
///
/// The `identifier` field accepts a username or an email. On success the
/// session token is returned in the body and also set as an `HttpOnly`
/// cookie for browser clients.
///
/// # Errors
///
/// Returns 401 Unauthorized with one generic message for any credential
/// failure; whether the account exists is not disclosed.
pub async fn sign_in_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .auth_service
        .sign_in(&payload.identifier, &payload.password)
        .await?;

    let token = state.auth_service.issue_session(&user)?;

    let cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        state.auth_service.session_ttl_seconds()
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Reports whether a username is free to register.
///
/// # Endpoint
///
/// `GET /api/check-username-unique?username=<name>`
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or malformed username; the store
/// is only consulted for well-formed names.
pub async fn check_username_handler(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    query.validate()?;

    let available = state
        .auth_service
        .username_available(&query.username)
        .await?;

    let message = if available {
        "Username is available".to_string()
    } else {
        "Username already exists".to_string()
    };

    Ok(Json(AvailabilityResponse { available, message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{AuthService, LinkService};
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockLinkRepository, MockUserRepository};
    use crate::utils::short_id;
    use axum::Router;
    use axum::routing::{get, post};
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(users: MockUserRepository) -> AppState {
        AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::new(users),
                "test-signing-secret".to_string(),
                24,
            )),
            link_service: Arc::new(LinkService::new(
                Arc::new(MockLinkRepository::new()),
                short_id::DEFAULT_LENGTH,
            )),
            db: sqlx::PgPool::connect_lazy("postgres://localhost/snaplink_test").unwrap(),
        }
    }

    fn server(users: MockUserRepository) -> TestServer {
        let app = Router::new()
            .route("/sign-up", post(sign_up_handler))
            .route("/sign-in", post(sign_in_handler))
            .route("/check-username-unique", get(check_username_handler))
            .with_state(state_with(users));
        TestServer::new(app).unwrap()
    }

    fn stored_user(username: &str, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: AuthService::hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_sign_up_created() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|new_user| {
            let now = Utc::now();
            Ok(User {
                id: 1,
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
                created_at: now,
                updated_at: now,
            })
        });

        let response = server(users)
            .post("/sign-up")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter22"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_username_is_bad_request() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|name| Ok(Some(stored_user(name, "a@example.com", "pw123456"))));
        users.expect_create().times(0);

        let response = server(users)
            .post("/sign-up")
            .json(&json!({
                "username": "alice",
                "email": "new@example.com",
                "password": "hunter22"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_sign_up_rejects_malformed_payload() {
        // Validation fails before any repository call.
        let users = MockUserRepository::new();

        let response = server(users)
            .post("/sign-up")
            .json(&json!({
                "username": "a",
                "email": "not-an-email",
                "password": "short"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_sign_in_returns_token_and_cookie() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_identifier()
            .returning(|_| Ok(Some(stored_user("alice", "alice@example.com", "hunter22"))));

        let response = server(users)
            .post("/sign-in")
            .json(&json!({ "identifier": "alice", "password": "hunter22" }))
            .await;

        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["user"]["username"], "alice");

        let cookie = response.header("set-cookie");
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("session_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn test_sign_in_failure_same_for_absent_and_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_identifier()
            .withf(|id| id == "ghost")
            .returning(|_| Ok(None));
        users
            .expect_find_by_identifier()
            .withf(|id| id == "alice")
            .returning(|_| Ok(Some(stored_user("alice", "alice@example.com", "hunter22"))));

        let server = server(users);

        let absent = server
            .post("/sign-in")
            .json(&json!({ "identifier": "ghost", "password": "whatever" }))
            .await;
        let wrong = server
            .post("/sign-in")
            .json(&json!({ "identifier": "alice", "password": "nope-nope" }))
            .await;

        absent.assert_status_unauthorized();
        wrong.assert_status_unauthorized();

        let absent_body: serde_json::Value = absent.json();
        let wrong_body: serde_json::Value = wrong.json();
        assert_eq!(absent_body, wrong_body);
    }

    #[tokio::test]
    async fn test_check_username_available() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let response = server(users)
            .get("/check-username-unique")
            .add_query_param("username", "fresh_name")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["available"], true);
    }

    #[tokio::test]
    async fn test_check_username_taken() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|name| Ok(Some(stored_user(name, "x@example.com", "pw123456"))));

        let response = server(users)
            .get("/check-username-unique")
            .add_query_param("username", "alice")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["available"], false);
    }

    #[tokio::test]
    async fn test_check_username_rejects_bad_format() {
        let users = MockUserRepository::new();

        let response = server(users)
            .get("/check-username-unique")
            .add_query_param("username", "bad name!")
            .await;

        response.assert_status_bad_request();
    }
}
