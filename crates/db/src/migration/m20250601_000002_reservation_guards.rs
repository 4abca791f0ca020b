//! Database-level reservation guards.
//!
//! PostgreSQL only: a check constraint on the stay dates and an exclusion
//! constraint that rejects two overlapping stays of the same property, so a
//! race between two serializable transactions still cannot double-book.
//! SQLite relies on the repository check alone.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

/// Name of the exclusion constraint, matched when mapping database errors.
pub const NO_OVERLAP_CONSTRAINT: &str = "reservations_no_overlap";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared(BTREE_GIST_SQL).await?;
        db.execute_unprepared(DATES_CHECK_SQL).await?;
        db.execute_unprepared(NO_OVERLAP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(DROP_GUARDS_SQL)
            .await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const BTREE_GIST_SQL: &str = "CREATE EXTENSION IF NOT EXISTS btree_gist";

const DATES_CHECK_SQL: &str = r"
ALTER TABLE reservations
    ADD CONSTRAINT reservations_dates_check CHECK (check_out > check_in)
";

// Half-open ranges so a check-out day can be the next check-in.
const NO_OVERLAP_SQL: &str = r"
ALTER TABLE reservations
    ADD CONSTRAINT reservations_no_overlap
    EXCLUDE USING gist (
        property_id WITH =,
        daterange(check_in, check_out, '[)') WITH &&
    )
";

const DROP_GUARDS_SQL: &str = r"
ALTER TABLE reservations DROP CONSTRAINT IF EXISTS reservations_no_overlap;
ALTER TABLE reservations DROP CONSTRAINT IF EXISTS reservations_dates_check;
";
