//! User identity record.

use chrono::{DateTime, Utc};

/// A registered account. `password_hash` is an Argon2id PHC string; the
/// plaintext secret never leaves the sign-up/sign-in boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
