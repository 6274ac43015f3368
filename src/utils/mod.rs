//! Shared utilities.

pub mod destination;
pub mod short_id;
