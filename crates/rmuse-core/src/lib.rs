//! Service plumbing shared by rmuse binaries: tracing, request ids, wire formats.

pub mod middleware;
pub mod serde;
pub mod tracing;
