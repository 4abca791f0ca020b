//! Calendar view of reservations.
//!
//! Events follow the FullCalendar event object shape so the frontend can
//! render them without reshaping.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::error::ReservationError;
use super::types::{DateWindow, Platform};

/// Color used when a stored platform is not recognized.
pub const FALLBACK_COLOR: &str = "#3788D8";

/// Text color of every event.
pub const TEXT_COLOR: &str = "#FFFFFF";

impl Platform {
    /// Calendar color of the platform.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Airbnb => "#FF5A5F",
            Self::Booking => "#003580",
            Self::Direct => "#27AE60",
            Self::Other => "#F39C12",
        }
    }
}

/// Returns the color for a stored platform value, falling back for unknown values.
#[must_use]
pub fn platform_color(platform: &str) -> &'static str {
    platform
        .parse::<Platform>()
        .map_or(FALLBACK_COLOR, Platform::color)
}

/// Reservation fields needed to draw one event.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    /// Reservation ID.
    pub id: Uuid,
    /// Guest name.
    pub guest_name: String,
    /// Property display name.
    pub property_name: String,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date.
    pub check_out: NaiveDate,
    /// Stored platform value.
    pub platform: String,
    /// Stored status value.
    pub status: String,
    /// Total price in USD.
    pub total_amount: Decimal,
    /// Deposit in USD.
    pub deposit_amount: Option<Decimal>,
    /// Notes.
    pub notes: Option<String>,
}

/// Auxiliary event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEventProps {
    /// Booking channel.
    pub platform: String,
    /// Total price in USD.
    pub total_amount: Decimal,
    /// Deposit in USD.
    pub deposit_amount: Option<Decimal>,
    /// Notes.
    pub notes: Option<String>,
    /// Property display name.
    pub property: String,
    /// Reservation status.
    pub status: String,
}

/// One calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Reservation ID.
    pub id: Uuid,
    /// `"<guest> (<property>)"`.
    pub title: String,
    /// Check-in date.
    pub start: NaiveDate,
    /// Check-out date (exclusive).
    pub end: NaiveDate,
    /// Fill color.
    pub background_color: &'static str,
    /// Border color.
    pub border_color: &'static str,
    /// Text color.
    pub text_color: &'static str,
    /// Auxiliary payload.
    pub extended_props: CalendarEventProps,
}

impl From<CalendarEntry> for CalendarEvent {
    fn from(entry: CalendarEntry) -> Self {
        let color = platform_color(&entry.platform);
        Self {
            id: entry.id,
            title: format!("{} ({})", entry.guest_name, entry.property_name),
            start: entry.check_in,
            end: entry.check_out,
            background_color: color,
            border_color: color,
            text_color: TEXT_COLOR,
            extended_props: CalendarEventProps {
                platform: entry.platform,
                total_amount: entry.total_amount,
                deposit_amount: entry.deposit_amount,
                notes: entry.notes,
                property: entry.property_name,
                status: entry.status,
            },
        }
    }
}

/// Returns `[first-of-month, last-of-month]` for the month containing `day`.
#[must_use]
pub fn month_window(day: NaiveDate) -> DateWindow {
    let first = day.with_day(1).unwrap_or(day);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    DateWindow {
        desde: first,
        hasta: last,
    }
}

/// Resolves the calendar window.
///
/// A missing start defaults to the first day of `today`'s month, a missing
/// end to the last day of the start's month.
///
/// # Errors
///
/// Returns `ReservationError::InvalidWindow` if the resolved window is inverted.
pub fn resolve_window(
    desde: Option<NaiveDate>,
    hasta: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateWindow, ReservationError> {
    let desde = desde.unwrap_or_else(|| month_window(today).desde);
    let hasta = hasta.unwrap_or_else(|| month_window(desde).hasta);
    DateWindow::new(desde, hasta)
}
