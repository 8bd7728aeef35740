//! Domain types and rules for the movie catalogue.
//!
//! This crate has no database dependency so the same rules can be shared by
//! the repository layer and any caller that builds requests for it.

pub mod error;
pub mod filters;
pub mod movie;
pub mod timeouts;
pub mod types;
