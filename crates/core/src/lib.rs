//! Core business logic for Staybook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `reservation` - Stay overlap rules, reservation validation, calendar events
//! - `ledger` - Cash movement validation, currency conversion, summaries
//! - `integration` - External reservation feeds and CSV import

pub mod integration;
pub mod ledger;
pub mod reservation;
