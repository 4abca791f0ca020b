//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger operations,
//! including lookup errors, movement validation errors, currency errors,
//! and category state errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use staybook_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use super::types::MovementType;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Lookup Errors ==========
    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Movement not found.
    #[error("Movement not found: {0}")]
    MovementNotFound(Uuid),

    /// Referenced reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    // ========== Validation Errors ==========
    /// Movement type differs from its category's type.
    #[error("Movement type must be {required} for the selected category")]
    TypeMismatch {
        /// Type fixed by the category.
        required: MovementType,
    },

    /// Amount is zero or negative.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Amount larger than the ledger can store.
    #[error("Amount must not exceed {max}")]
    AmountTooLarge {
        /// Largest accepted amount.
        max: Decimal,
    },

    /// A partial update tried to clear a required field.
    #[error("Field '{0}' is required and cannot be null")]
    RequiredFieldCleared(&'static str),

    /// Summary window with its start after its end.
    #[error("Invalid date window: desde ({desde}) is after hasta ({hasta})")]
    InvalidWindow {
        /// Window start.
        desde: NaiveDate,
        /// Window end.
        hasta: NaiveDate,
    },

    /// Year outside the supported calendar range.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    // ========== Currency Errors ==========
    /// Foreign currency movement without an exchange rate.
    #[error("Exchange rate is required for {currency} movements")]
    MissingExchangeRate {
        /// Currency code.
        currency: &'static str,
    },

    /// Exchange rate must be positive.
    #[error("Exchange rate must be positive")]
    InvalidExchangeRate,

    /// Exchange rate larger than the ledger can store.
    #[error("Exchange rate must not exceed {max}")]
    ExchangeRateTooLarge {
        /// Largest accepted rate.
        max: Decimal,
    },

    /// Local currency movement carrying an exchange rate.
    #[error("Exchange rate is only allowed for foreign currency movements")]
    UnexpectedExchangeRate,

    // ========== Category Errors ==========
    /// Category name already taken.
    #[error("Category name already exists: {0}")]
    DuplicateCategoryName(String),

    /// Category name is empty or whitespace.
    #[error("Category name cannot be blank")]
    BlankCategoryName,

    /// Category still has movements and cannot be deleted.
    #[error("Category {category_id} has {count} movement(s) and cannot be deleted")]
    CategoryInUse {
        /// The category ID.
        category_id: Uuid,
        /// Number of movements referencing it.
        count: u64,
    },

    /// Category type cannot be changed because it has movements.
    #[error("Cannot change type of category {0} because it has movements")]
    CategoryTypeChangeNotAllowed(Uuid),

    // ========== Aggregation Errors ==========
    /// A summary total left the representable range.
    #[error("Ledger totals exceed the supported range")]
    TotalOverflow,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::MovementNotFound(_) => "MOVEMENT_NOT_FOUND",
            Self::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::RequiredFieldCleared(_) => "REQUIRED_FIELD_CLEARED",
            Self::InvalidWindow { .. } => "INVALID_WINDOW",
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::MissingExchangeRate { .. } => "MISSING_EXCHANGE_RATE",
            Self::InvalidExchangeRate => "INVALID_EXCHANGE_RATE",
            Self::ExchangeRateTooLarge { .. } => "EXCHANGE_RATE_TOO_LARGE",
            Self::UnexpectedExchangeRate => "UNEXPECTED_EXCHANGE_RATE",
            Self::DuplicateCategoryName(_) => "DUPLICATE_CATEGORY_NAME",
            Self::BlankCategoryName => "BLANK_CATEGORY_NAME",
            Self::CategoryInUse { .. } => "CATEGORY_IN_USE",
            Self::CategoryTypeChangeNotAllowed(_) => "CATEGORY_TYPE_CHANGE_NOT_ALLOWED",
            Self::TotalOverflow => "TOTAL_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::TypeMismatch { .. }
            | Self::NonPositiveAmount
            | Self::AmountTooLarge { .. }
            | Self::RequiredFieldCleared(_)
            | Self::InvalidWindow { .. }
            | Self::InvalidYear(_)
            | Self::MissingExchangeRate { .. }
            | Self::InvalidExchangeRate
            | Self::ExchangeRateTooLarge { .. }
            | Self::UnexpectedExchangeRate
            | Self::DuplicateCategoryName(_)
            | Self::BlankCategoryName => 400,

            // 404 Not Found
            Self::CategoryNotFound(_)
            | Self::MovementNotFound(_)
            | Self::ReservationNotFound(_) => 404,

            // 409 Conflict - blocked by dependent records
            Self::CategoryInUse { .. } | Self::CategoryTypeChangeNotAllowed(_) => 409,

            // 500 - stored data the aggregation cannot represent
            Self::TotalOverflow => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            500 => Self::Internal(message),
            _ => Self::Validation(message),
        }
    }
}
