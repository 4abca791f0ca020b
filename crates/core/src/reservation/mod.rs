//! Reservation Manager rules.
//!
//! This module implements the booking side of the system:
//! - Half-open stay overlap detection
//! - Draft validation and partial update merging
//! - Calendar event mapping
//! - Error types for reservation operations

pub mod calendar;
pub mod error;
pub mod overlap;
pub mod service;
pub mod types;

#[cfg(test)]
mod overlap_props;

pub use calendar::{
    CalendarEntry, CalendarEvent, CalendarEventProps, platform_color, resolve_window,
};
pub use error::ReservationError;
pub use overlap::{find_conflict, overlaps};
pub use service::{ReservationService, ResolvedUpdate};
pub use types::{
    BookedStay, DateWindow, Platform, ReservationDraft, ReservationPatch, ReservationStatus,
    StayRange,
};
