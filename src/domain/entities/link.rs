//! Link entity representing a short-identifier-to-destination mapping.

use chrono::{DateTime, Utc};

/// A shortened link owned by a user.
///
/// The `short_id` is the public path component; `is_active` and `expires_at`
/// are two independent gates evaluated at resolution time.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub original_url: String,
    pub user_id: i64,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link carries an expiry strictly in the past.
    ///
    /// A `None` expiry means the link is permanent.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| e < Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_id: String,
    pub original_url: String,
    pub user_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
}
