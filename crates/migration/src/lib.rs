pub use sea_orm_migration::prelude::*;

mod m20240805_120000_users;
mod m20240805_121500_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240805_120000_users::Migration),
            Box::new(m20240805_121500_entries::Migration),
        ]
    }
}
