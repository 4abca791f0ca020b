//! Initial database migration.
//!
//! Creates properties, reservations, categories and movements with the
//! schema builder so the same migration runs on PostgreSQL and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: PROPERTIES & RESERVATIONS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::Name).string().not_null())
                    .col(ColumnDef::new(Properties::Description).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Reservations::CheckIn).date().not_null())
                    .col(ColumnDef::new(Reservations::CheckOut).date().not_null())
                    .col(ColumnDef::new(Reservations::GuestName).string().not_null())
                    .col(ColumnDef::new(Reservations::Platform).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::TotalAmount)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::DepositAmount).decimal_len(14, 2))
                    .col(ColumnDef::new(Reservations::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservations-property_id")
                            .from(Reservations::Table, Reservations::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-reservations-property_id-check_in")
                    .table(Reservations::Table)
                    .col(Reservations::PropertyId)
                    .col(Reservations::CheckIn)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: CASH LEDGER
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Description).string())
                    .col(ColumnDef::new(Categories::MovementType).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-name-unique")
                    .table(Categories::Table)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movements::Date).date().not_null())
                    .col(ColumnDef::new(Movements::MovementType).string().not_null())
                    .col(ColumnDef::new(Movements::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Movements::Description).text())
                    .col(ColumnDef::new(Movements::Amount).decimal_len(14, 2).not_null())
                    .col(
                        ColumnDef::new(Movements::Currency)
                            .string_len(3)
                            .not_null()
                            .default("ARS"),
                    )
                    .col(ColumnDef::new(Movements::ExchangeRate).decimal_len(14, 4))
                    .col(ColumnDef::new(Movements::Partner).string().not_null())
                    .col(ColumnDef::new(Movements::ReservationId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-category_id")
                            .from(Movements::Table, Movements::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-reservation_id")
                            .from(Movements::Table, Movements::ReservationId)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-movements-date")
                    .table(Movements::Table)
                    .col(Movements::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum Reservations {
    Table,
    Id,
    PropertyId,
    CheckIn,
    CheckOut,
    GuestName,
    Platform,
    Status,
    TotalAmount,
    DepositAmount,
    Notes,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    MovementType,
}

#[derive(Iden)]
enum Movements {
    Table,
    Id,
    Date,
    MovementType,
    CategoryId,
    Description,
    Amount,
    Currency,
    ExchangeRate,
    Partner,
    ReservationId,
}
