//! Shared fixtures for repository tests against in-memory SQLite.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use staybook_core::ledger::{MovementDraft, MovementType, Partner};
use staybook_core::reservation::{Platform, ReservationDraft, ReservationStatus};
use staybook_db::entities::{categories, properties};
use staybook_db::migration::{Migrator, MigratorTrait};
use staybook_db::repositories::{
    CategoryRepository, CreateCategoryInput, CreatePropertyInput, PropertyRepository,
};
use staybook_shared::types::Currency;
use uuid::Uuid;

pub async fn setup() -> DatabaseConnection {
    let db = staybook_db::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn property(db: &DatabaseConnection, name: &str) -> properties::Model {
    PropertyRepository::new(db.clone())
        .create(CreatePropertyInput {
            name: name.to_string(),
            description: None,
        })
        .await
        .unwrap()
}

pub async fn category(
    db: &DatabaseConnection,
    name: &str,
    movement_type: MovementType,
) -> categories::Model {
    CategoryRepository::new(db.clone())
        .create(CreateCategoryInput {
            name: name.to_string(),
            description: None,
            movement_type,
        })
        .await
        .unwrap()
}

pub fn stay(property_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> ReservationDraft {
    ReservationDraft {
        property_id,
        check_in,
        check_out,
        guest_name: "Ana".to_string(),
        platform: Platform::Airbnb,
        status: ReservationStatus::Confirmed,
        total_amount: Decimal::new(450, 0),
        deposit_amount: None,
        notes: None,
    }
}

pub fn movement(
    category: &categories::Model,
    date: NaiveDate,
    movement_type: MovementType,
    amount: Decimal,
) -> MovementDraft {
    MovementDraft {
        date,
        movement_type,
        category_id: category.id,
        description: None,
        amount,
        currency: Currency::Ars,
        exchange_rate: None,
        partner: Partner::All,
        reservation_id: None,
    }
}
