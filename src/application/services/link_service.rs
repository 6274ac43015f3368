//! Link lifecycle and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::destination::check_destination;
use crate::utils::short_id;

/// Outcome of resolving a short identifier, evaluated in fixed order:
/// absent, expired, inactive, redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No link carries this short identifier.
    NotFound,
    /// The link's expiry lies in the past; its active flag has been cleared.
    Expired,
    /// The link was explicitly deactivated by its owner.
    Inactive,
    /// Active and unexpired; redirect to the destination.
    Redirect(String),
}

/// Service implementing link creation, ownership-scoped management, and
/// short-identifier resolution.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    short_id_length: usize,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>, short_id_length: usize) -> Self {
        Self {
            links,
            short_id_length,
        }
    }

    /// Creates a short link for a destination URL.
    ///
    /// # Idempotent re-shortening
    ///
    /// If any link already points at the exact same destination, that link is
    /// returned unchanged and no new identifier is minted.
    ///
    /// # Code generation
    ///
    /// Fresh identifiers are drawn from the random generator with a bounded
    /// collision retry against the store before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the destination is empty or
    /// malformed, or if `expires_at` is not in the future.
    /// Returns [`AppError::Internal`] on persistence failure or identifier
    /// exhaustion.
    pub async fn create_link(
        &self,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
        user_id: i64,
    ) -> Result<Link, AppError> {
        let destination = check_destination(original_url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "url": original_url })))?;

        if let Some(expiry) = expires_at
            && expiry <= Utc::now()
        {
            return Err(AppError::bad_request(
                "Expiration must be in the future",
                json!({ "expires_at": expiry }),
            ));
        }

        if let Some(existing) = self.links.find_by_original_url(&destination).await? {
            tracing::debug!(short_id = %existing.short_id, "Reusing existing link for destination");
            return Ok(existing);
        }

        let new_short_id = self.generate_unique_short_id().await?;

        self.links
            .create(NewLink {
                short_id: new_short_id,
                original_url: destination,
                user_id,
                expires_at,
            })
            .await
    }

    /// Returns all links owned by a user, newest first.
    ///
    /// An empty result is not an error at this level; the HTTP boundary
    /// decides how to report it.
    pub async fn links_for_user(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_by_user(user_id).await
    }

    /// Flips the active flag on a caller-owned link.
    ///
    /// The flip is independent of expiration: reactivating an expired link
    /// succeeds here, but resolution still blocks it on the expiry gate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist **or** is
    /// owned by someone else; the two cases are indistinguishable by design.
    pub async fn toggle_active(&self, link_id: i64, user_id: i64) -> Result<Link, AppError> {
        self.links
            .toggle_active(link_id, user_id)
            .await?
            .ok_or_else(Self::not_found_or_unauthorized)
    }

    /// Permanently deletes a caller-owned link.
    ///
    /// # Errors
    ///
    /// Same merged not-found/unauthorized reporting as [`Self::toggle_active`].
    pub async fn delete_link(&self, link_id: i64, user_id: i64) -> Result<Link, AppError> {
        self.links
            .delete_owned(link_id, user_id)
            .await?
            .ok_or_else(Self::not_found_or_unauthorized)
    }

    /// Resolves a short identifier to an outcome.
    ///
    /// Checks run in fixed order: lookup, expiry, active flag. Expiry is
    /// checked before the active flag so an expired-but-still-active record
    /// is downgraded on its first post-expiry access instead of redirecting
    /// once more. The downgrade write is idempotent; repeated accesses while
    /// expired produce the same outcome.
    pub async fn resolve(&self, short_id: &str) -> Result<Resolution, AppError> {
        let Some(link) = self.links.find_by_short_id(short_id).await? else {
            return Ok(Resolution::NotFound);
        };

        if link.is_expired() {
            self.links.deactivate(link.id).await?;
            return Ok(Resolution::Expired);
        }

        if !link.is_active {
            return Ok(Resolution::Inactive);
        }

        Ok(Resolution::Redirect(link.original_url))
    }

    fn not_found_or_unauthorized() -> AppError {
        AppError::not_found("Link not found or unauthorized", json!({}))
    }

    /// Generates a short identifier not yet present in the store.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_short_id(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let candidate = short_id::generate(self.short_id_length);

            if self.links.find_by_short_id(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short id",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
