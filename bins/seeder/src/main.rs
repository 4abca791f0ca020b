//! Database seeder for Staybook development and testing.
//!
//! Seeds sample properties and the usual income and expense categories.
//! Rows are matched by name, so running it twice changes nothing.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use staybook_core::ledger::MovementType;
use staybook_db::entities::{categories, properties};
use uuid::Uuid;

const PROPERTIES: [(&str, &str); 2] = [
    ("Casa Sur", "Two-bedroom house with garden"),
    ("Depto Centro", "Downtown apartment, 4th floor"),
];

const CATEGORIES: [(&str, MovementType); 7] = [
    ("Rentals", MovementType::Income),
    ("Deposits", MovementType::Income),
    ("Cleaning", MovementType::Expense),
    ("Utilities", MovementType::Expense),
    ("Maintenance", MovementType::Expense),
    ("Platform commissions", MovementType::Expense),
    ("Rent", MovementType::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = staybook_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding properties...");
    seed_properties(&db).await?;

    println!("Seeding categories...");
    seed_categories(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_properties(db: &DatabaseConnection) -> anyhow::Result<()> {
    let mut inserted = 0;
    for (name, description) in PROPERTIES {
        let exists = properties::Entity::find()
            .filter(properties::Column::Name.eq(name))
            .one(db)
            .await?
            .is_some();
        if exists {
            println!("  Property {name} already exists, skipping...");
            continue;
        }

        properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    println!("  Inserted {inserted} properties");
    Ok(())
}

async fn seed_categories(db: &DatabaseConnection) -> anyhow::Result<()> {
    let mut inserted = 0;
    for (name, movement_type) in CATEGORIES {
        let exists = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(None),
            movement_type: Set(movement_type.as_str().to_string()),
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    println!("  Inserted {inserted} categories");
    Ok(())
}
