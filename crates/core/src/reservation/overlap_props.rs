//! Property-based tests for the no-double-booking rule.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use uuid::Uuid;

use super::overlap::overlaps;
use super::service::ReservationService;
use super::types::{BookedStay, StayRange};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Strategy for a stay starting within a year with 1..=21 nights.
fn stay_strategy() -> impl Strategy<Value = StayRange> {
    (0u64..365, 1u64..=21).prop_map(|(offset, nights)| {
        let check_in = base().checked_add_days(Days::new(offset)).unwrap();
        let check_out = check_in.checked_add_days(Days::new(nights)).unwrap();
        StayRange::new(check_in, check_out).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Overlap is symmetric.
    #[test]
    fn prop_overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// A stay starting on another's check-out never overlaps it.
    #[test]
    fn prop_turnover_never_overlaps(a in stay_strategy(), nights in 1u64..=21) {
        let next_out = a.check_out.checked_add_days(Days::new(nights)).unwrap();
        let next = StayRange::new(a.check_out, next_out).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(!overlaps(next.check_in, next.check_out, a.check_in, a.check_out));
    }

    /// Accepting only available stays leaves no overlapping pair.
    #[test]
    fn prop_accepted_stays_never_overlap(
        attempts in prop::collection::vec(stay_strategy(), 1..40),
    ) {
        let property = Uuid::nil();
        let mut booked: Vec<BookedStay> = Vec::new();

        for (i, stay) in attempts.iter().enumerate() {
            if ReservationService::ensure_available(property, stay, &booked, None).is_ok() {
                booked.push(BookedStay {
                    reservation_id: Uuid::from_u128(i as u128 + 1),
                    check_in: stay.check_in,
                    check_out: stay.check_out,
                });
            }
        }

        for (i, a) in booked.iter().enumerate() {
            for b in &booked[i + 1..] {
                prop_assert!(!overlaps(a.check_in, a.check_out, b.check_in, b.check_out));
            }
        }
    }

    /// A stay never conflicts with itself when it is excluded.
    #[test]
    fn prop_update_excludes_self(stay in stay_strategy()) {
        let id = Uuid::from_u128(7);
        let booked = [BookedStay {
            reservation_id: id,
            check_in: stay.check_in,
            check_out: stay.check_out,
        }];
        let property_id = Uuid::nil();
        prop_assert!(
            ReservationService::ensure_available(property_id, &stay, &booked, Some(id)).is_ok()
        );
        prop_assert!(
            ReservationService::ensure_available(property_id, &stay, &booked, None).is_err()
        );
    }
}
