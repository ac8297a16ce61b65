pub mod credential;
pub mod repository;
pub mod types;
pub mod validation;
pub mod visibility;
