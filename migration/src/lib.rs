pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_templates_table;
mod m20250301_000002_create_pages_table;
mod m20250301_000003_create_portfolios_table;
mod m20250301_000004_create_projects_table;
mod m20250301_000005_create_works_table;
mod m20250301_000006_create_texts_table;
mod m20250301_000007_create_feedbacks_table;
mod m20250302_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_templates_table::Migration),
            Box::new(m20250301_000002_create_pages_table::Migration),
            Box::new(m20250301_000003_create_portfolios_table::Migration),
            Box::new(m20250301_000004_create_projects_table::Migration),
            Box::new(m20250301_000005_create_works_table::Migration),
            Box::new(m20250301_000006_create_texts_table::Migration),
            Box::new(m20250301_000007_create_feedbacks_table::Migration),
            Box::new(m20250302_000001_add_indexes::Migration),
        ]
    }
}
