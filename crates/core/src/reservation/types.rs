//! Domain types for reservations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staybook_shared::types::Patch;
use uuid::Uuid;

use super::error::ReservationError;

/// Channel a reservation was booked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Airbnb.
    Airbnb,
    /// Booking.com.
    Booking,
    /// Booked directly with the owners.
    Direct,
    /// Any other channel.
    Other,
}

impl Platform {
    /// All platforms.
    pub const ALL: [Self; 4] = [Self::Airbnb, Self::Booking, Self::Direct, Self::Other];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Airbnb => "airbnb",
            Self::Booking => "booking",
            Self::Direct => "direct",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Airbnb => "Airbnb",
            Self::Booking => "Booking",
            Self::Direct => "Direct",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "airbnb" => Ok(Self::Airbnb),
            "booking" | "booking.com" => Ok(Self::Booking),
            "direct" | "particular" => Ok(Self::Direct),
            "other" | "otro" => Ok(Self::Other),
            _ => Err(format!("Unknown platform: {s}")),
        }
    }
}

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by the guest.
    Confirmed,
    /// Cancelled.
    Cancelled,
    /// Stay has finished.
    Completed,
}

impl ReservationStatus {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown reservation status: {s}")),
        }
    }
}

/// A half-open stay `[check_in, check_out)`.
///
/// The check-out day is free for the next guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day (not occupied).
    pub check_out: NaiveDate,
}

impl StayRange {
    /// Creates a stay, requiring check-out strictly after check-in.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::InvalidDates` for empty or inverted stays.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ReservationError> {
        if check_out <= check_in {
            return Err(ReservationError::InvalidDates {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns true if both stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        super::overlap::overlaps(self.check_in, self.check_out, other.check_in, other.check_out)
    }

    /// Number of nights.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// A date window used to query reservations, sync feeds, and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Window start.
    pub desde: NaiveDate,
    /// Window end.
    pub hasta: NaiveDate,
}

impl DateWindow {
    /// Creates a window, requiring `desde <= hasta`.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::InvalidWindow` if the window is inverted.
    pub fn new(desde: NaiveDate, hasta: NaiveDate) -> Result<Self, ReservationError> {
        if desde > hasta {
            return Err(ReservationError::InvalidWindow { desde, hasta });
        }
        Ok(Self { desde, hasta })
    }
}

/// Input for creating a reservation.
///
/// Also used as the full value set of a stored reservation when applying
/// partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    /// Property being booked.
    pub property_id: Uuid,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date.
    pub check_out: NaiveDate,
    /// Guest name.
    pub guest_name: String,
    /// Booking channel.
    pub platform: Platform,
    /// Status, pending when omitted.
    #[serde(default)]
    pub status: ReservationStatus,
    /// Total price in USD.
    pub total_amount: Decimal,
    /// Deposit received in USD.
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReservationDraft {
    /// Returns the stay covered by this draft.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::InvalidDates` if check-out is not after check-in.
    pub fn stay(&self) -> Result<StayRange, ReservationError> {
        StayRange::new(self.check_in, self.check_out)
    }
}

/// Partial update for a reservation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationPatch {
    /// New property.
    #[serde(default)]
    pub property_id: Patch<Uuid>,
    /// New check-in date.
    #[serde(default)]
    pub check_in: Patch<NaiveDate>,
    /// New check-out date.
    #[serde(default)]
    pub check_out: Patch<NaiveDate>,
    /// New guest name.
    #[serde(default)]
    pub guest_name: Patch<String>,
    /// New platform.
    #[serde(default)]
    pub platform: Patch<Platform>,
    /// New status.
    #[serde(default)]
    pub status: Patch<ReservationStatus>,
    /// New total.
    #[serde(default)]
    pub total_amount: Patch<Decimal>,
    /// New deposit, `null` clears it.
    #[serde(default)]
    pub deposit_amount: Patch<Decimal>,
    /// New notes, `null` clears them.
    #[serde(default)]
    pub notes: Patch<String>,
}

impl ReservationPatch {
    /// Returns true if the patch moves the stay in time or to another property.
    #[must_use]
    pub fn touches_availability(&self) -> bool {
        self.property_id.is_present() || self.check_in.is_present() || self.check_out.is_present()
    }
}

/// A stored stay, as seen by the availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedStay {
    /// Reservation ID.
    pub reservation_id: Uuid,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date.
    pub check_out: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stay_range_rejects_empty_and_inverted() {
        assert!(StayRange::new(date(2024, 6, 1), date(2024, 6, 1)).is_err());
        assert!(StayRange::new(date(2024, 6, 2), date(2024, 6, 1)).is_err());

        let stay = StayRange::new(date(2024, 6, 1), date(2024, 6, 10)).unwrap();
        assert_eq!(stay.nights(), 9);
    }

    #[test]
    fn test_date_window() {
        assert!(DateWindow::new(date(2024, 6, 1), date(2024, 6, 1)).is_ok());
        assert!(matches!(
            DateWindow::new(date(2024, 6, 2), date(2024, 6, 1)),
            Err(ReservationError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!(Platform::from_str("Airbnb").unwrap(), Platform::Airbnb);
        assert_eq!(Platform::from_str("particular").unwrap(), Platform::Direct);
        assert_eq!(Platform::from_str(" OTHER ").unwrap(), Platform::Other);
        assert!(Platform::from_str("vrbo").is_err());
    }

    #[test]
    fn test_draft_deserialize_defaults() {
        let draft: ReservationDraft = serde_json::from_str(
            r#"{
                "property_id": "00000000-0000-0000-0000-000000000000",
                "check_in": "2024-06-01",
                "check_out": "2024-06-10",
                "guest_name": "Ana",
                "platform": "airbnb",
                "total_amount": "450.00"
            }"#,
        )
        .unwrap();
        assert_eq!(draft.status, ReservationStatus::Pending);
        assert_eq!(draft.deposit_amount, None);
        assert_eq!(draft.stay().unwrap().nights(), 9);
    }

    #[test]
    fn test_patch_touches_availability() {
        let patch: ReservationPatch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert!(!patch.touches_availability());
        assert_eq!(patch.notes, Patch::Null);

        let patch: ReservationPatch =
            serde_json::from_str(r#"{"check_out": "2024-06-12"}"#).unwrap();
        assert!(patch.touches_availability());
    }
}
