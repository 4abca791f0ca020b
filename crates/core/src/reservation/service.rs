//! Reservation service for draft validation and availability checks.
//!
//! Pure business logic: the caller loads the property's booked stays and the
//! stored reservation, this service decides whether the write may proceed.

use rust_decimal::Decimal;
use staybook_shared::types::Patch;
use uuid::Uuid;

use super::error::ReservationError;
use super::overlap::find_conflict;
use super::types::{BookedStay, ReservationDraft, ReservationPatch, StayRange};

/// Result of merging a patch into a stored reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpdate {
    /// Values to store.
    pub values: ReservationDraft,
    /// Whether the availability check has to run again.
    pub recheck_availability: bool,
}

/// Reservation service for validation and availability.
pub struct ReservationService;

impl ReservationService {
    /// Validates a full draft and returns its stay.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError` if dates, guest name, or amounts are invalid.
    pub fn validate_draft(draft: &ReservationDraft) -> Result<StayRange, ReservationError> {
        let stay = draft.stay()?;

        if draft.guest_name.trim().is_empty() {
            return Err(ReservationError::BlankGuestName);
        }
        if draft.total_amount < Decimal::ZERO {
            return Err(ReservationError::NegativeAmount("total_amount"));
        }
        if draft.deposit_amount.is_some_and(|d| d < Decimal::ZERO) {
            return Err(ReservationError::NegativeAmount("deposit_amount"));
        }

        Ok(stay)
    }

    /// Ensures `stay` is free on the property.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::Overlap` naming the first conflicting reservation.
    pub fn ensure_available(
        property_id: Uuid,
        stay: &StayRange,
        booked: &[BookedStay],
        exclude: Option<Uuid>,
    ) -> Result<(), ReservationError> {
        match find_conflict(stay, booked, exclude) {
            Some(conflict) => Err(ReservationError::Overlap {
                property_id,
                conflicting_id: conflict.reservation_id,
                check_in: conflict.check_in,
                check_out: conflict.check_out,
            }),
            None => Ok(()),
        }
    }

    /// Merges a patch into the stored values and validates the result.
    ///
    /// Absent fields keep their stored value, `null` clears optional fields.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::RequiredFieldCleared` when `null` targets a
    /// required field, or any error from [`Self::validate_draft`].
    pub fn apply_patch(
        current: ReservationDraft,
        patch: ReservationPatch,
    ) -> Result<ResolvedUpdate, ReservationError> {
        let recheck_availability = patch.touches_availability();

        let values = ReservationDraft {
            property_id: required(patch.property_id, current.property_id, "property_id")?,
            check_in: required(patch.check_in, current.check_in, "check_in")?,
            check_out: required(patch.check_out, current.check_out, "check_out")?,
            guest_name: required(patch.guest_name, current.guest_name, "guest_name")?,
            platform: required(patch.platform, current.platform, "platform")?,
            status: required(patch.status, current.status, "status")?,
            total_amount: required(patch.total_amount, current.total_amount, "total_amount")?,
            deposit_amount: patch.deposit_amount.merge(current.deposit_amount),
            notes: patch.notes.merge(current.notes),
        };

        Self::validate_draft(&values)?;

        Ok(ResolvedUpdate {
            values,
            recheck_availability,
        })
    }
}

fn required<T>(
    patch: Patch<T>,
    current: T,
    field: &'static str,
) -> Result<T, ReservationError> {
    patch
        .merge_required(current)
        .ok_or(ReservationError::RequiredFieldCleared(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::types::{Platform, ReservationStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(check_in: NaiveDate, check_out: NaiveDate) -> ReservationDraft {
        ReservationDraft {
            property_id: Uuid::from_u128(1),
            check_in,
            check_out,
            guest_name: "Ana".to_string(),
            platform: Platform::Airbnb,
            status: ReservationStatus::Confirmed,
            total_amount: dec!(450),
            deposit_amount: Some(dec!(100)),
            notes: Some("late arrival".to_string()),
        }
    }

    #[test]
    fn test_validate_draft() {
        let stay = draft(date(2024, 6, 1), date(2024, 6, 10));
        assert!(ReservationService::validate_draft(&stay).is_ok());

        let mut blank = draft(date(2024, 6, 1), date(2024, 6, 10));
        blank.guest_name = "   ".to_string();
        assert!(matches!(
            ReservationService::validate_draft(&blank),
            Err(ReservationError::BlankGuestName)
        ));

        let mut negative = draft(date(2024, 6, 1), date(2024, 6, 10));
        negative.deposit_amount = Some(dec!(-1));
        assert!(matches!(
            ReservationService::validate_draft(&negative),
            Err(ReservationError::NegativeAmount("deposit_amount"))
        ));

        assert!(matches!(
            ReservationService::validate_draft(&draft(date(2024, 6, 10), date(2024, 6, 10))),
            Err(ReservationError::InvalidDates { .. })
        ));
    }

    #[test]
    fn test_ensure_available_example() {
        // P1 has A = [06-01, 06-10)
        let property = Uuid::from_u128(1);
        let booked = vec![BookedStay {
            reservation_id: Uuid::from_u128(10),
            check_in: date(2024, 6, 1),
            check_out: date(2024, 6, 10),
        }];

        let b = StayRange::new(date(2024, 6, 5), date(2024, 6, 15)).unwrap();
        let err = ReservationService::ensure_available(property, &b, &booked, None).unwrap_err();
        let ReservationError::Overlap { conflicting_id, .. } = err else {
            panic!("expected an overlap, got {err:?}");
        };
        assert_eq!(conflicting_id, Uuid::from_u128(10));

        let c = StayRange::new(date(2024, 6, 10), date(2024, 6, 20)).unwrap();
        assert!(ReservationService::ensure_available(property, &c, &booked, None).is_ok());
    }

    #[test]
    fn test_apply_patch_keeps_absent_and_clears_null() {
        let current = draft(date(2024, 6, 1), date(2024, 6, 10));
        let patch = ReservationPatch {
            status: Patch::Value(ReservationStatus::Completed),
            notes: Patch::Null,
            ..ReservationPatch::default()
        };

        let resolved = ReservationService::apply_patch(current.clone(), patch).unwrap();
        assert!(!resolved.recheck_availability);
        assert_eq!(resolved.values.status, ReservationStatus::Completed);
        assert_eq!(resolved.values.notes, None);
        assert_eq!(resolved.values.deposit_amount, current.deposit_amount);
        assert_eq!(resolved.values.check_in, current.check_in);
    }

    #[test]
    fn test_apply_patch_rechecks_on_date_change() {
        let current = draft(date(2024, 6, 1), date(2024, 6, 10));
        let patch = ReservationPatch {
            check_out: Patch::Value(date(2024, 6, 12)),
            ..ReservationPatch::default()
        };

        let resolved = ReservationService::apply_patch(current, patch).unwrap();
        assert!(resolved.recheck_availability);
        assert_eq!(resolved.values.check_out, date(2024, 6, 12));
    }

    #[test]
    fn test_apply_patch_rejects_null_required_field() {
        let current = draft(date(2024, 6, 1), date(2024, 6, 10));
        let patch = ReservationPatch {
            guest_name: Patch::Null,
            ..ReservationPatch::default()
        };
        assert!(matches!(
            ReservationService::apply_patch(current, patch),
            Err(ReservationError::RequiredFieldCleared("guest_name"))
        ));
    }

    #[test]
    fn test_apply_patch_validates_merged_dates() {
        let current = draft(date(2024, 6, 1), date(2024, 6, 10));
        let patch = ReservationPatch {
            check_in: Patch::Value(date(2024, 6, 11)),
            ..ReservationPatch::default()
        };
        assert!(matches!(
            ReservationService::apply_patch(current, patch),
            Err(ReservationError::InvalidDates { .. })
        ));
    }
}
