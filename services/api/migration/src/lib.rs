use sea_orm_migration::prelude::*;

mod m20180101_000001_create_users;
mod m20180101_000002_create_media;
mod m20180101_000003_create_follows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20180101_000001_create_users::Migration),
            Box::new(m20180101_000002_create_media::Migration),
            Box::new(m20180101_000003_create_follows::Migration),
        ]
    }
}
