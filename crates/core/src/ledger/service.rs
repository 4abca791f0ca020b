//! Ledger service for movement validation and partial updates.
//!
//! This module provides the core business logic for validating cash
//! movements before they are persisted to the database.

use staybook_shared::types::Patch;

use super::error::LedgerError;
use super::types::{CategoryInfo, MovementDraft, MovementPatch};
use super::validation::validate_movement;

/// Ledger service for movement validation.
///
/// This service contains pure business logic with no database dependencies.
/// The caller resolves the category, this service checks the rules.
pub struct LedgerService;

impl LedgerService {
    /// Validates a movement against its resolved category.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn validate(draft: &MovementDraft, category: &CategoryInfo) -> Result<(), LedgerError> {
        validate_movement(draft, category)
    }

    /// Merges a patch into the stored values.
    ///
    /// Switching to the local currency without touching the rate drops the
    /// stored rate. The merged movement still has to pass [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::RequiredFieldCleared` when `null` targets a
    /// required field.
    pub fn apply_patch(
        current: MovementDraft,
        patch: MovementPatch,
    ) -> Result<MovementDraft, LedgerError> {
        let currency = required(patch.currency, current.currency, "currency")?;

        let exchange_rate = match patch.exchange_rate {
            Patch::Absent if !currency.is_foreign() => None,
            rate => rate.merge(current.exchange_rate),
        };

        Ok(MovementDraft {
            date: required(patch.date, current.date, "date")?,
            movement_type: required(patch.movement_type, current.movement_type, "movement_type")?,
            category_id: required(patch.category_id, current.category_id, "category_id")?,
            description: patch.description.merge(current.description),
            amount: required(patch.amount, current.amount, "amount")?,
            currency,
            exchange_rate,
            partner: required(patch.partner, current.partner, "partner")?,
            reservation_id: patch.reservation_id.merge(current.reservation_id),
        })
    }
}

fn required<T>(patch: Patch<T>, current: T, field: &'static str) -> Result<T, LedgerError> {
    patch
        .merge_required(current)
        .ok_or(LedgerError::RequiredFieldCleared(field))
}
