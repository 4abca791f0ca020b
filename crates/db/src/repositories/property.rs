//! Property repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use staybook_core::reservation::ReservationError;
use staybook_shared::types::{PageRequest, Patch};
use uuid::Uuid;

use super::error::ReservationStoreError;
use crate::entities::{properties, reservations};

/// Input for creating a property.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyInput {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePropertyInput {
    /// New name.
    #[serde(default)]
    pub name: Patch<String>,
    /// New description, `null` clears it.
    #[serde(default)]
    pub description: Patch<String>,
}

/// Property repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a property.
    pub async fn create(
        &self,
        input: CreatePropertyInput,
    ) -> Result<properties::Model, ReservationStoreError> {
        let name = normalize_name(&input.name)?;

        let property = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(input.description),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(property_id = %property.id, name = %property.name, "Property created");
        Ok(property)
    }

    /// Finds a property by ID.
    pub async fn get(&self, id: Uuid) -> Result<properties::Model, ReservationStoreError> {
        properties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ReservationError::PropertyNotFound(id).into())
    }

    /// Lists properties ordered by name.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Vec<properties::Model>, ReservationStoreError> {
        let properties = properties::Entity::find()
            .order_by_asc(properties::Column::Name)
            .order_by_asc(properties::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(properties)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<properties::Model, ReservationStoreError> {
        let current = self.get(id).await?;

        let name = input
            .name
            .merge_required(current.name.clone())
            .ok_or(ReservationError::RequiredFieldCleared("name"))?;
        let name = normalize_name(&name)?;
        let description = input.description.merge(current.description.clone());

        let mut active: properties::ActiveModel = current.into();
        active.name = Set(name);
        active.description = Set(description);
        let property = active.update(&self.db).await?;

        tracing::info!(property_id = %id, "Property updated");
        Ok(property)
    }

    /// Deletes a property that has no reservations.
    pub async fn delete(&self, id: Uuid) -> Result<(), ReservationStoreError> {
        let property = self.get(id).await?;

        let count = reservations::Entity::find()
            .filter(reservations::Column::PropertyId.eq(id))
            .count(&self.db)
            .await?;
        if count > 0 {
            return Err(ReservationError::PropertyInUse {
                property_id: id,
                count,
            }
            .into());
        }

        properties::Entity::delete_by_id(property.id)
            .exec(&self.db)
            .await?;

        tracing::info!(property_id = %id, "Property deleted");
        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, ReservationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ReservationError::BlankPropertyName);
    }
    Ok(trimmed.to_string())
}
