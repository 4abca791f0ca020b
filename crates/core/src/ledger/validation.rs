//! Business rule validation for cash movements.

use rust_decimal::Decimal;
use staybook_shared::types::Currency;

use super::error::LedgerError;
use super::types::{CategoryInfo, MovementDraft, MovementType};

/// Largest storable amount, `NUMERIC(14, 2)`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Largest storable exchange rate, `NUMERIC(14, 4)`.
pub const MAX_EXCHANGE_RATE: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 4);

/// Validates that the movement type matches the category's type.
///
/// # Errors
///
/// Returns `LedgerError::TypeMismatch` naming the category's type.
pub fn validate_type(
    movement_type: MovementType,
    category: &CategoryInfo,
) -> Result<(), LedgerError> {
    if movement_type != category.movement_type {
        return Err(LedgerError::TypeMismatch {
            required: category.movement_type,
        });
    }
    Ok(())
}

/// Validates the currency and exchange rate pairing.
///
/// A rate is present iff the currency is foreign. It must be positive and
/// no larger than [`MAX_EXCHANGE_RATE`].
///
/// # Errors
///
/// Returns a currency error if the pairing is invalid.
pub fn validate_currency(
    currency: Currency,
    exchange_rate: Option<Decimal>,
) -> Result<(), LedgerError> {
    match (currency.is_foreign(), exchange_rate) {
        (true, None) => Err(LedgerError::MissingExchangeRate {
            currency: currency.code(),
        }),
        (true, Some(rate)) if rate <= Decimal::ZERO => Err(LedgerError::InvalidExchangeRate),
        (true, Some(rate)) if rate > MAX_EXCHANGE_RATE => {
            Err(LedgerError::ExchangeRateTooLarge { max: MAX_EXCHANGE_RATE })
        }
        (false, Some(_)) => Err(LedgerError::UnexpectedExchangeRate),
        _ => Ok(()),
    }
}

/// Validates that an amount is positive and storable.
///
/// # Errors
///
/// Returns `LedgerError::NonPositiveAmount` for zero or negative amounts and
/// `LedgerError::AmountTooLarge` above [`MAX_AMOUNT`].
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge { max: MAX_AMOUNT });
    }
    Ok(())
}

/// Validates a full movement against its category.
///
/// # Errors
///
/// Returns the first rule the movement breaks.
pub fn validate_movement(
    draft: &MovementDraft,
    category: &CategoryInfo,
) -> Result<(), LedgerError> {
    validate_type(draft.movement_type, category)?;
    validate_currency(draft.currency, draft.exchange_rate)?;
    validate_amount(draft.amount)
}

/// Validates and normalizes a category name.
///
/// # Errors
///
/// Returns `LedgerError::BlankCategoryName` for empty names.
pub fn normalize_category_name(name: &str) -> Result<String, LedgerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::BlankCategoryName);
    }
    Ok(trimmed.to_string())
}
