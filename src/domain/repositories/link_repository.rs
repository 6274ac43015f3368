//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for link persistence.
///
/// Ownership-scoped mutations take both the link id and the caller's user id
/// and report a miss for rows matching neither, so "absent" and "not owned"
/// stay indistinguishable above this seam.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the short id collides with an
    /// existing row, [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short identifier.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by exact destination URL match.
    ///
    /// Used for idempotent re-shortening: the same destination never mints a
    /// second identifier.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by a user, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Flips the active flag on a link owned by `user_id`.
    ///
    /// Returns `Ok(None)` when no row matches both the id and the owner.
    async fn toggle_active(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError>;

    /// Permanently removes a link owned by `user_id`.
    ///
    /// Returns the deleted row, or `Ok(None)` when no row matches both the
    /// id and the owner.
    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError>;

    /// Sets `is_active = false` on a link regardless of owner.
    ///
    /// Idempotent; used by the resolution path to downgrade expired links.
    async fn deactivate(&self, id: i64) -> Result<(), AppError>;
}
