pub mod follow;
pub mod media;
pub mod session;
pub mod user;
