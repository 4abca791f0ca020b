//! Half-open interval overlap rules.

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{BookedStay, StayRange};

/// Returns true if `[a_in, a_out)` and `[b_in, b_out)` share at least one night.
///
/// Back-to-back stays (`a_out == b_in`) do not overlap.
#[must_use]
pub fn overlaps(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_out > b_in && a_in < b_out
}

/// Finds the first booked stay that overlaps `candidate`.
///
/// `exclude` skips the reservation being updated.
pub fn find_conflict<'a, I>(
    candidate: &StayRange,
    booked: I,
    exclude: Option<Uuid>,
) -> Option<&'a BookedStay>
where
    I: IntoIterator<Item = &'a BookedStay>,
{
    booked.into_iter().find(|stay| {
        Some(stay.reservation_id) != exclude
            && overlaps(
                stay.check_in,
                stay.check_out,
                candidate.check_in,
                candidate.check_out,
            )
    })
}
