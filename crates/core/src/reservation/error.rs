//! Reservation error types.

use chrono::NaiveDate;
use staybook_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while booking or changing a stay.
#[derive(Debug, Error)]
pub enum ReservationError {
    // ========== Lookup Errors ==========
    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    // ========== Validation Errors ==========
    /// Check-out is not strictly after check-in.
    #[error("Check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidDates {
        /// Requested check-in.
        check_in: NaiveDate,
        /// Requested check-out.
        check_out: NaiveDate,
    },

    /// Date window with its start after its end.
    #[error("Invalid date window: desde ({desde}) is after hasta ({hasta})")]
    InvalidWindow {
        /// Window start.
        desde: NaiveDate,
        /// Window end.
        hasta: NaiveDate,
    },

    /// Guest name is empty or whitespace.
    #[error("Guest name cannot be blank")]
    BlankGuestName,

    /// Property name is empty or whitespace.
    #[error("Property name cannot be blank")]
    BlankPropertyName,

    /// A money field is negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// A partial update tried to clear a required field.
    #[error("Field '{0}' is required and cannot be null")]
    RequiredFieldCleared(&'static str),

    // ========== Availability Errors ==========
    /// The stay intersects another reservation of the same property.
    #[error(
        "Property {property_id} is already booked from {check_in} to {check_out} (reservation {conflicting_id})"
    )]
    Overlap {
        /// Property being booked.
        property_id: Uuid,
        /// Reservation holding the dates.
        conflicting_id: Uuid,
        /// Check-in of the conflicting reservation.
        check_in: NaiveDate,
        /// Check-out of the conflicting reservation.
        check_out: NaiveDate,
    },

    /// Property still has reservations and cannot be deleted.
    #[error("Property {property_id} has {count} reservation(s) and cannot be deleted")]
    PropertyInUse {
        /// The property ID.
        property_id: Uuid,
        /// Number of reservations referencing it.
        count: u64,
    },
}

impl ReservationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PropertyNotFound(_) => "PROPERTY_NOT_FOUND",
            Self::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            Self::InvalidDates { .. } => "INVALID_DATES",
            Self::InvalidWindow { .. } => "INVALID_WINDOW",
            Self::BlankGuestName => "BLANK_GUEST_NAME",
            Self::BlankPropertyName => "BLANK_PROPERTY_NAME",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::RequiredFieldCleared(_) => "REQUIRED_FIELD_CLEARED",
            Self::Overlap { .. } => "RESERVATION_OVERLAP",
            Self::PropertyInUse { .. } => "PROPERTY_IN_USE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDates { .. }
            | Self::InvalidWindow { .. }
            | Self::BlankGuestName
            | Self::BlankPropertyName
            | Self::NegativeAmount(_)
            | Self::RequiredFieldCleared(_) => 400,

            Self::PropertyNotFound(_) | Self::ReservationNotFound(_) => 404,

            Self::Overlap { .. } | Self::PropertyInUse { .. } => 409,
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Validation(message),
        }
    }
}
