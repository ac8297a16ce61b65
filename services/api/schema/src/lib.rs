pub mod follows;
pub mod media;
pub mod users;
