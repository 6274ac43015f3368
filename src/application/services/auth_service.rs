//! Account registration, credential verification, and session tokens.

use std::sync::Arc;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Claims carried by a session token: user identity plus standard expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Service backing the authentication boundary.
///
/// Passwords are hashed with Argon2id before storage and never kept in
/// plaintext. Sessions are HS256-signed JWTs carrying user id, username, and
/// email; handlers derive the caller identity solely from a validated token.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signing_secret: String,
    session_ttl_hours: u64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` keys the session token signature and must stay
    /// stable across restarts for sessions to survive them.
    pub fn new(users: Arc<dyn UserRepository>, signing_secret: String, session_ttl_hours: u64) -> Self {
        Self {
            users,
            signing_secret,
            session_ttl_hours,
        }
    }

    /// Session lifetime in seconds, for cookie attributes.
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_hours * 3600
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the username or email is
    /// already taken. Uniqueness is re-checked by the store's constraints,
    /// so a racing duplicate still fails cleanly.
    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::bad_request(
                "Username already exists",
                json!({ "username": username }),
            ));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::bad_request(
                "Email already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = Self::hash_password(password)?;

        self.users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
    }

    /// Verifies credentials for a username-or-email identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with one generic message for both
    /// an unknown identifier and a wrong password, so sign-in cannot be used
    /// to probe which accounts exist.
    pub async fn sign_in(&self, identifier: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.users.find_by_identifier(identifier).await? else {
            return Err(Self::invalid_credentials());
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::internal("Corrupt password hash", json!({})))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(Self::invalid_credentials());
        }

        Ok(user)
    }

    /// Reports whether a username is free to register.
    pub async fn username_available(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.find_by_username(username).await?.is_none())
    }

    /// Issues a signed session token for a user.
    pub fn issue_session(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + (self.session_ttl_hours * 3600) as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.signing_secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AppError::internal("Failed to issue session", json!({}))
        })
    }

    /// Validates a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, mis-signed, or
    /// expired tokens.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.signing_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired session" }),
            )
        })
    }

    /// Hashes a password with Argon2id and a fresh random salt.
    ///
    /// Public so the admin CLI can create accounts without going through the
    /// HTTP boundary.
    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AppError::internal("Failed to hash password", json!({}))
            })
    }

    fn invalid_credentials() -> AppError {
        AppError::unauthorized("Invalid credentials", json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn test_user(id: i64, username: &str, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: AuthService::hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(repo), "test-signing-secret".to_string(), 24)
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|new_user| {
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

        let user = service(repo)
            .sign_up("alice", "alice@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        // Stored as a PHC string, never plaintext.
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "hunter22");
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|name| Ok(Some(test_user(1, name, "a@example.com", "pw123456"))));
        repo.expect_create().times(0);

        let result = service(repo)
            .sign_up("alice", "other@example.com", "hunter22")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(test_user(1, "bob", email, "pw123456"))));
        repo.expect_create().times(0);

        let result = service(repo)
            .sign_up("alice", "taken@example.com", "hunter22")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_sign_in_success_by_username_or_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier()
            .times(2)
            .returning(|_| Ok(Some(test_user(1, "alice", "alice@example.com", "hunter22"))));

        let service = service(repo);
        assert!(service.sign_in("alice", "hunter22").await.is_ok());
        assert!(service.sign_in("alice@example.com", "hunter22").await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_in_failure_is_generic() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier()
            .withf(|id| id == "ghost")
            .returning(|_| Ok(None));
        repo.expect_find_by_identifier()
            .withf(|id| id == "alice")
            .returning(|_| Ok(Some(test_user(1, "alice", "alice@example.com", "hunter22"))));

        let service = service(repo);
        let absent = service.sign_in("ghost", "whatever").await.unwrap_err();
        let wrong = service.sign_in("alice", "wrong-password").await.unwrap_err();

        // Absent user and wrong password must be indistinguishable.
        assert!(matches!(absent, AppError::Unauthorized { .. }));
        assert!(matches!(wrong, AppError::Unauthorized { .. }));
        assert_eq!(absent.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_session_round_trip_carries_identity() {
        let repo = MockUserRepository::new();
        let service = service(repo);

        let user = test_user(42, "alice", "alice@example.com", "hunter22");
        let token = service.issue_session(&user).unwrap();
        let claims = service.verify_session(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_verify_session_rejects_wrong_secret() {
        let user = test_user(1, "alice", "alice@example.com", "hunter22");

        let issuer = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
            24,
        );
        let verifier = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
            24,
        );

        let token = issuer.issue_session(&user).unwrap();
        let result = verifier.verify_session(&token);

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_verify_session_rejects_garbage() {
        let service = service(MockUserRepository::new());
        assert!(service.verify_session("not-a-token").is_err());
    }

    #[tokio::test]
    async fn test_username_available() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .withf(|name| name == "free")
            .returning(|_| Ok(None));
        repo.expect_find_by_username()
            .withf(|name| name == "taken")
            .returning(|name| Ok(Some(test_user(1, name, "t@example.com", "pw123456"))));

        let service = service(repo);
        assert!(service.username_available("free").await.unwrap());
        assert!(!service.username_available("taken").await.unwrap());
    }

    #[test]
    fn test_hash_password_salts_differ() {
        let h1 = AuthService::hash_password("same-password").unwrap();
        let h2 = AuthService::hash_password("same-password").unwrap();
        assert_ne!(h1, h2);
    }
}
