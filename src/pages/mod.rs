//! Rendered status pages for resolution outcomes.
//!
//! Redirect failures surface a human-readable page instead of a JSON error
//! body; the short identifier is echoed so visitors can spot typos.

use askama::Template;
use askama_web::WebTemplate;

/// Page shown when no link carries the requested short identifier.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub short_id: String,
}

/// Page shown when the link's expiry has passed.
#[derive(Template, WebTemplate)]
#[template(path = "expired.html")]
pub struct ExpiredPage {
    pub short_id: String,
}

/// Page shown when the owner has deactivated the link.
#[derive(Template, WebTemplate)]
#[template(path = "inactive.html")]
pub struct InactivePage {
    pub short_id: String,
}
