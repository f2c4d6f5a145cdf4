pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_user_table;
mod m20251101_000002_create_ticket_table;
mod m20251101_000003_create_session_table;
mod m20251101_000004_create_route_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_user_table::Migration),
            Box::new(m20251101_000002_create_ticket_table::Migration),
            Box::new(m20251101_000003_create_session_table::Migration),
            Box::new(m20251101_000004_create_route_table::Migration),
        ]
    }
}
