//! Bearer-token authentication shared by rmuse services.
//!
//! Provides JWT issuance and verification, the signing-key source, and
//! `Authorization` header parsing.

pub mod bearer;
pub mod key;
pub mod token;
