use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_categories;
mod m20250601_000003_create_content_items;
mod m20250601_000004_create_content_item_categories;
mod m20250601_000005_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_categories::Migration),
            Box::new(m20250601_000003_create_content_items::Migration),
            Box::new(m20250601_000004_create_content_item_categories::Migration),
            Box::new(m20250601_000005_add_lookup_indexes::Migration),
        ]
    }
}
