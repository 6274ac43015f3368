//! Destination URL validation.
//!
//! Destinations are stored verbatim (deduplication is by exact match), so
//! this guard only rejects inputs that cannot be redirected to safely.

use url::Url;

/// Errors produced while checking a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    #[error("Destination URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS destinations are allowed")]
    UnsupportedScheme,
}

/// Checks that a destination is a non-empty, well-formed HTTP(S) URL.
///
/// Returns the trimmed destination on success. Schemes like `javascript:`
/// or `data:` are rejected to keep the redirect endpoint from becoming an
/// open script vector.
pub fn check_destination(raw: &str) -> Result<String, DestinationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(DestinationError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|e| DestinationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(DestinationError::UnsupportedScheme),
    }
}
