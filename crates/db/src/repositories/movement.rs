//! Movement repository for the cash ledger.
//!
//! Every create and update resolves the category and the referenced
//! reservation, runs the ledger rules on the full value set and writes inside
//! one transaction.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use staybook_core::ledger::{
    LedgerError, LedgerService, MovementDraft, MovementPatch, MovementType, Partner,
};
use staybook_shared::types::{Currency, PageRequest};
use uuid::Uuid;

use super::category::{category_info, find_category};
use super::error::LedgerStoreError;
use crate::entities::{categories, movements, reservations};

/// Movement together with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementWithCategory {
    /// The movement record.
    #[serde(flatten)]
    pub movement: movements::Model,
    /// The movement's category.
    pub category: categories::Model,
}

/// Filter options for listing movements.
///
/// The date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementFilter {
    /// On or after this day.
    pub desde: Option<NaiveDate>,
    /// On or before this day.
    pub hasta: Option<NaiveDate>,
    /// Only income or only expense.
    pub movement_type: Option<MovementType>,
    /// Only this category.
    pub category_id: Option<Uuid>,
    /// Only this partner.
    pub partner: Option<Partner>,
    /// Only this currency.
    pub currency: Option<Currency>,
}

/// Movement repository.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a movement.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The category or the referenced reservation does not exist
    /// - The type differs from the category's type
    /// - The currency and exchange rate do not pair up
    /// - The amount is not positive
    pub async fn create(
        &self,
        draft: MovementDraft,
    ) -> Result<MovementWithCategory, LedgerStoreError> {
        let txn = self.db.begin().await?;

        let category = check(&txn, &draft).await?;

        let mut active = movements::ActiveModel {
            id: Set(Uuid::new_v4()),
            ..Default::default()
        };
        assign(&mut active, &draft);
        let movement = active.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            movement_id = %movement.id,
            category_id = %category.id,
            movement_type = %movement.movement_type,
            amount = %movement.amount,
            currency = %movement.currency,
            "Movement created"
        );
        Ok(MovementWithCategory { movement, category })
    }

    /// Applies a partial update and re-validates the merged movement.
    pub async fn update(
        &self,
        id: Uuid,
        patch: MovementPatch,
    ) -> Result<MovementWithCategory, LedgerStoreError> {
        let txn = self.db.begin().await?;

        let current = movements::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::MovementNotFound(id))?;

        let merged = LedgerService::apply_patch(draft_of(&current)?, patch)?;
        let category = check(&txn, &merged).await?;

        let mut active: movements::ActiveModel = current.into();
        assign(&mut active, &merged);
        let movement = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(movement_id = %id, "Movement updated");
        Ok(MovementWithCategory { movement, category })
    }

    /// Deletes a movement.
    pub async fn delete(&self, id: Uuid) -> Result<(), LedgerStoreError> {
        let movement = movements::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::MovementNotFound(id))?;

        movement.delete(&self.db).await?;

        tracing::info!(movement_id = %id, "Movement deleted");
        Ok(())
    }

    /// Finds a movement with its category.
    pub async fn get(&self, id: Uuid) -> Result<MovementWithCategory, LedgerStoreError> {
        let (movement, category) = movements::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::MovementNotFound(id))?;

        with_category(movement, category)
    }

    /// Lists movements by date, newest first.
    pub async fn list(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<Vec<MovementWithCategory>, LedgerStoreError> {
        let mut query = movements::Entity::find().find_also_related(categories::Entity);

        if let Some(desde) = filter.desde {
            query = query.filter(movements::Column::Date.gte(desde));
        }
        if let Some(hasta) = filter.hasta {
            query = query.filter(movements::Column::Date.lte(hasta));
        }
        if let Some(movement_type) = filter.movement_type {
            query = query.filter(movements::Column::MovementType.eq(movement_type.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(movements::Column::CategoryId.eq(category_id));
        }
        if let Some(partner) = filter.partner {
            query = query.filter(movements::Column::Partner.eq(partner.as_str()));
        }
        if let Some(currency) = filter.currency {
            query = query.filter(movements::Column::Currency.eq(currency.code()));
        }

        tracing::debug!(?filter, skip = page.offset(), limit = page.limit(), "Listing movements");

        query
            .order_by_desc(movements::Column::Date)
            .order_by_desc(movements::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(movement, category)| with_category(movement, category))
            .collect()
    }
}

/// Resolves the category and reservation of a movement and runs the rules.
async fn check<C: ConnectionTrait>(
    db: &C,
    draft: &MovementDraft,
) -> Result<categories::Model, LedgerStoreError> {
    let category = find_category(db, draft.category_id).await?;
    LedgerService::validate(draft, &category_info(&category)?)?;

    if let Some(reservation_id) = draft.reservation_id {
        reservations::Entity::find_by_id(reservation_id)
            .one(db)
            .await?
            .ok_or(LedgerError::ReservationNotFound(reservation_id))?;
    }

    Ok(category)
}

fn assign(active: &mut movements::ActiveModel, draft: &MovementDraft) {
    active.date = Set(draft.date);
    active.movement_type = Set(draft.movement_type.as_str().to_string());
    active.category_id = Set(draft.category_id);
    active.description = Set(draft.description.clone());
    active.amount = Set(draft.amount);
    active.currency = Set(draft.currency.code().to_string());
    active.exchange_rate = Set(draft.exchange_rate);
    active.partner = Set(draft.partner.as_str().to_string());
    active.reservation_id = Set(draft.reservation_id);
}

/// Reads a stored movement back into a draft.
fn draft_of(model: &movements::Model) -> Result<MovementDraft, LedgerStoreError> {
    Ok(MovementDraft {
        date: model.date,
        movement_type: model
            .movement_type
            .parse()
            .map_err(LedgerStoreError::Corrupt)?,
        category_id: model.category_id,
        description: model.description.clone(),
        amount: model.amount,
        currency: model.currency.parse().map_err(LedgerStoreError::Corrupt)?,
        exchange_rate: model.exchange_rate,
        partner: model.partner.parse().map_err(LedgerStoreError::Corrupt)?,
        reservation_id: model.reservation_id,
    })
}

fn with_category(
    movement: movements::Model,
    category: Option<categories::Model>,
) -> Result<MovementWithCategory, LedgerStoreError> {
    let category = category.ok_or_else(|| {
        LedgerStoreError::Corrupt(format!(
            "movement {} references missing category {}",
            movement.id, movement.category_id
        ))
    })?;
    Ok(MovementWithCategory { movement, category })
}
