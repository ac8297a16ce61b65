pub mod follow;
pub mod health;
pub mod media;
pub mod session;
pub mod user;
