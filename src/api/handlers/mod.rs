//! HTTP request handlers.

mod auth;
mod health;
mod links;
mod redirect;

pub use auth::{check_username_handler, sign_in_handler, sign_up_handler};
pub use health::health_handler;
pub use links::{
    change_activity_handler, create_link_handler, delete_link_handler, list_links_handler,
};
pub use redirect::redirect_handler;
