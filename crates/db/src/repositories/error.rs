//! Repository error types.
//!
//! Each repository wraps the core rule errors of its area together with
//! `DbErr`, and everything converts into `AppError` for the API layer.

use sea_orm::{DbErr, SqlErr};
use staybook_core::integration::FeedError;
use staybook_core::ledger::LedgerError;
use staybook_core::reservation::ReservationError;
use staybook_shared::AppError;

use crate::migration::NO_OVERLAP_CONSTRAINT;

/// Errors from property and reservation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReservationStoreError {
    /// A booking rule was broken.
    #[error(transparent)]
    Rule(#[from] ReservationError),

    /// A concurrent write booked the same nights first.
    #[error("Reservation conflicts with a concurrent booking: {0}")]
    Contention(String),

    /// A stored value could not be read back into a domain type.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ReservationStoreError {
    /// Classifies a database error raised inside a booking transaction.
    ///
    /// Exclusion constraint violations and serialization failures mean another
    /// transaction won the race for the same nights. Reads fail this way too
    /// under SERIALIZABLE isolation.
    #[must_use]
    pub fn from_txn(err: DbErr) -> Self {
        let message = err.to_string();
        if message.contains(NO_OVERLAP_CONSTRAINT)
            || message.contains("could not serialize access")
            || message.contains("40001")
        {
            Self::Contention(message)
        } else {
            Self::Database(err)
        }
    }
}

impl From<ReservationStoreError> for AppError {
    fn from(err: ReservationStoreError) -> Self {
        match err {
            ReservationStoreError::Rule(e) => e.into(),
            ReservationStoreError::Contention(_) => Self::Conflict(err.to_string()),
            ReservationStoreError::Corrupt(message) => Self::Internal(message),
            ReservationStoreError::Database(e) => database_error(&e),
        }
    }
}

/// Errors from category, movement and report operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    /// A ledger rule was broken.
    #[error(transparent)]
    Rule(#[from] LedgerError),

    /// A stored value could not be read back into a domain type.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl LedgerStoreError {
    /// Maps a unique index violation on the category name to a rule error.
    #[must_use]
    pub fn from_category_write(err: DbErr, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Rule(LedgerError::DuplicateCategoryName(name.to_string()))
            }
            _ => Self::Database(err),
        }
    }
}

impl From<LedgerStoreError> for AppError {
    fn from(err: LedgerStoreError) -> Self {
        match err {
            LedgerStoreError::Rule(e) => e.into(),
            LedgerStoreError::Corrupt(message) => Self::Internal(message),
            LedgerStoreError::Database(e) => database_error(&e),
        }
    }
}

/// Errors from platform syncs and file imports.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The feed or file failed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Storing the drafts failed.
    #[error(transparent)]
    Store(#[from] ReservationStoreError),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Feed(e) => e.into(),
            ImportError::Store(e) => e.into(),
        }
    }
}

fn database_error(err: &DbErr) -> AppError {
    tracing::error!(error = %err, "Database operation failed");
    AppError::Database(err.to_string())
}
