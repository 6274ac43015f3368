#![allow(dead_code)]

use sqlx::PgPool;

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(pool: &PgPool, short_id: &str, url: &str, user_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_id, original_url, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(short_id)
    .bind(url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_expired_link(pool: &PgPool, short_id: &str, url: &str, user_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_id, original_url, user_id, expires_at) \
         VALUES ($1, $2, $3, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(short_id)
    .bind(url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_link(pool: &PgPool, short_id: &str, url: &str, user_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (short_id, original_url, user_id, is_active) \
         VALUES ($1, $2, $3, FALSE) RETURNING id",
    )
    .bind(short_id)
    .bind(url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link_at(
    pool: &PgPool,
    short_id: &str,
    url: &str,
    user_id: i64,
    age: &str,
) -> i64 {
    sqlx::query_scalar(&format!(
        "INSERT INTO links (short_id, original_url, user_id, created_at) \
         VALUES ($1, $2, $3, NOW() - INTERVAL '{age}') RETURNING id"
    ))
    .bind(short_id)
    .bind(url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
