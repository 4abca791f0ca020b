//! Reservation import from CSV exports.
//!
//! Expected header: `check_in,check_out,guest_name,platform,total_amount,deposit_amount,notes`.
//! Only the two dates are mandatory per row.

use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::error::FeedError;
use crate::reservation::{Platform, ReservationDraft, ReservationStatus};

/// Guest name used when a row leaves it empty.
pub const UNNAMED_GUEST: &str = "Unnamed guest";

#[derive(Debug, Deserialize)]
struct CsvRow {
    check_in: NaiveDate,
    check_out: NaiveDate,
    #[serde(default)]
    guest_name: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    total_amount: Option<String>,
    #[serde(default)]
    deposit_amount: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// A row that could not be turned into a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the file, header included.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// Parsed import file.
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    /// Drafts ready for the normal create path.
    pub drafts: Vec<ReservationDraft>,
    /// Rows that failed to parse.
    pub rejected: Vec<RejectedRow>,
}

/// Parses a CSV export into reservation drafts for `property_id`.
///
/// Bad rows are collected in [`CsvImport::rejected`] and parsing continues.
///
/// # Errors
///
/// Returns `FeedError::InvalidCsv` if the header cannot be read.
pub fn parse_reservations_csv(property_id: Uuid, data: &[u8]) -> Result<CsvImport, FeedError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .byte_headers()
        .map_err(|e| FeedError::InvalidCsv(e.to_string()))?
        .clone();
    for required in ["check_in", "check_out"] {
        if !headers.iter().any(|h| h == required.as_bytes()) {
            return Err(FeedError::InvalidCsv(format!("missing column '{required}'")));
        }
    }

    let mut import = CsvImport::default();
    let mut record = csv::ByteRecord::new();
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| FeedError::InvalidCsv(e.to_string()))?
    {
        let line = record.position().map_or(0, csv::Position::line);
        match parse_row(property_id, &record, &headers) {
            Ok(draft) => import.drafts.push(draft),
            Err(reason) => import.rejected.push(RejectedRow { line, reason }),
        }
    }

    Ok(import)
}

fn parse_row(
    property_id: Uuid,
    record: &csv::ByteRecord,
    headers: &csv::ByteRecord,
) -> Result<ReservationDraft, String> {
    let row: CsvRow = record.deserialize(Some(headers)).map_err(|e| e.to_string())?;

    let platform = match row.platform.as_deref().filter(|p| !p.is_empty()) {
        None => Platform::Other,
        Some(raw) => raw.parse::<Platform>()?,
    };

    Ok(ReservationDraft {
        property_id,
        check_in: row.check_in,
        check_out: row.check_out,
        guest_name: row
            .guest_name
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| UNNAMED_GUEST.to_string()),
        platform,
        status: ReservationStatus::Confirmed,
        total_amount: parse_amount(row.total_amount.as_deref(), "total_amount")?
            .unwrap_or(Decimal::ZERO),
        deposit_amount: parse_amount(row.deposit_amount.as_deref(), "deposit_amount")?,
        notes: row.notes.filter(|n| !n.is_empty()),
    })
}

fn parse_amount(raw: Option<&str>, field: &str) -> Result<Option<Decimal>, String> {
    match raw.filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(raw) => Decimal::from_str(raw)
            .map(Some)
            .map_err(|e| format!("invalid {field} '{raw}': {e}")),
    }
}
