//! External reservation sources.
//!
//! Platform feeds and file imports both produce [`ReservationDraft`]s that go
//! through the normal reservation create path.
//!
//! [`ReservationDraft`]: crate::reservation::ReservationDraft

pub mod csv_import;
pub mod error;
pub mod feed;

pub use csv_import::{CsvImport, RejectedRow, parse_reservations_csv};
pub use error::FeedError;
pub use feed::{
    FeedProperty, FeedRegistry, PlatformApiFeed, ReservationFeed, SyncCounts, SyncOutcome,
};
