pub use sea_orm_migration::prelude::*;

mod m20251103_201512_create_tables;
mod m20251103_214030_populate_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251103_201512_create_tables::Migration),
            Box::new(m20251103_214030_populate_catalog::Migration),
        ]
    }
}
