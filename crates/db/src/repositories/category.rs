//! Category repository for the cash ledger.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use staybook_core::ledger::{CategoryInfo, LedgerError, MovementType, normalize_category_name};
use staybook_shared::types::{PageRequest, Patch};
use uuid::Uuid;

use super::error::LedgerStoreError;
use crate::entities::{categories, movements};

/// Input for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    /// Unique name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Type every movement of the category must have.
    pub movement_type: MovementType,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryInput {
    /// New name.
    #[serde(default)]
    pub name: Patch<String>,
    /// New description, `null` clears it.
    #[serde(default)]
    pub description: Patch<String>,
    /// New type, only while the category has no movements.
    #[serde(default)]
    pub movement_type: Patch<MovementType>,
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category with a unique name.
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, LedgerStoreError> {
        let name = normalize_category_name(&input.name)?;
        self.ensure_unique_name(&name, None).await?;

        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.clone()),
            description: Set(input.description),
            movement_type: Set(input.movement_type.as_str().to_string()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| LedgerStoreError::from_category_write(e, &name))?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Finds a category by ID.
    pub async fn get(&self, id: Uuid) -> Result<categories::Model, LedgerStoreError> {
        find_category(&self.db, id).await
    }

    /// Lists categories ordered by name, optionally of one type.
    pub async fn list(
        &self,
        movement_type: Option<MovementType>,
        page: PageRequest,
    ) -> Result<Vec<categories::Model>, LedgerStoreError> {
        let mut query = categories::Entity::find();
        if let Some(movement_type) = movement_type {
            query = query.filter(categories::Column::MovementType.eq(movement_type.as_str()));
        }

        let categories = query
            .order_by_asc(categories::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The category does not exist
    /// - The new name is blank or taken
    /// - The type changes while movements reference the category
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, LedgerStoreError> {
        let current = self.get(id).await?;
        let current_type = movement_type_of(&current)?;

        let name = input
            .name
            .merge_required(current.name.clone())
            .ok_or(LedgerError::RequiredFieldCleared("name"))?;
        let name = normalize_category_name(&name)?;
        if name != current.name {
            self.ensure_unique_name(&name, Some(id)).await?;
        }

        let movement_type = input
            .movement_type
            .merge_required(current_type)
            .ok_or(LedgerError::RequiredFieldCleared("movement_type"))?;
        if movement_type != current_type && count_movements(&self.db, id).await? > 0 {
            return Err(LedgerError::CategoryTypeChangeNotAllowed(id).into());
        }

        let description = input.description.merge(current.description.clone());

        let mut active: categories::ActiveModel = current.into();
        active.name = Set(name.clone());
        active.description = Set(description);
        active.movement_type = Set(movement_type.as_str().to_string());
        let category = active
            .update(&self.db)
            .await
            .map_err(|e| LedgerStoreError::from_category_write(e, &name))?;

        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Deletes a category that no movement references.
    pub async fn delete(&self, id: Uuid) -> Result<(), LedgerStoreError> {
        let category = self.get(id).await?;

        let count = count_movements(&self.db, id).await?;
        if count > 0 {
            return Err(LedgerError::CategoryInUse {
                category_id: id,
                count,
            }
            .into());
        }

        categories::Entity::delete_by_id(category.id)
            .exec(&self.db)
            .await?;

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), LedgerStoreError> {
        let mut query = categories::Entity::find().filter(categories::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(categories::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(LedgerError::DuplicateCategoryName(name.to_string()).into());
        }
        Ok(())
    }
}

/// Finds a category by ID on any connection.
pub(crate) async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<categories::Model, LedgerStoreError> {
    categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| LedgerError::CategoryNotFound(id).into())
}

/// Reads the stored movement type of a category.
pub(crate) fn movement_type_of(
    category: &categories::Model,
) -> Result<MovementType, LedgerStoreError> {
    category
        .movement_type
        .parse()
        .map_err(LedgerStoreError::Corrupt)
}

/// Builds the validation view of a category.
pub(crate) fn category_info(
    category: &categories::Model,
) -> Result<CategoryInfo, LedgerStoreError> {
    Ok(CategoryInfo {
        id: category.id,
        name: category.name.clone(),
        movement_type: movement_type_of(category)?,
    })
}

async fn count_movements<C: ConnectionTrait>(
    db: &C,
    category_id: Uuid,
) -> Result<u64, LedgerStoreError> {
    let count = movements::Entity::find()
        .filter(movements::Column::CategoryId.eq(category_id))
        .count(db)
        .await?;
    Ok(count)
}
