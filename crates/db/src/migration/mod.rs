//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_initial;
mod m20250601_000002_reservation_guards;

pub use m20250601_000002_reservation_guards::NO_OVERLAP_CONSTRAINT;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_initial::Migration),
            Box::new(m20250601_000002_reservation_guards::Migration),
        ]
    }
}
