//! Cash ledger logic.
//!
//! This module implements the Ledger Aggregator:
//! - Domain types for movements, categories, and partners
//! - Business rule validation
//! - Partial update merging
//! - Foreign-to-local conversion
//! - Period summaries and monthly rollups
//! - Error types for ledger operations

pub mod conversion;
pub mod error;
pub mod service;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod summary_props;
#[cfg(test)]
mod validation_props;

pub use conversion::{accumulate, to_local};
pub use error::LedgerError;
pub use service::LedgerService;
pub use summary::{
    LedgerSummary, MonthSummary, PartnerTotals, SummaryService, month_bounds, year_bounds,
};
pub use types::{
    CategoryInfo, LedgerLine, MovementDraft, MovementPatch, MovementType, Partner,
};
pub use validation::normalize_category_name;
