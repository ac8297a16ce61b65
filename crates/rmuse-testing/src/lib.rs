//! Test utilities for rmuse services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
pub mod body;
