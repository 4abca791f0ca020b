//! Shared types, errors, and configuration for Staybook.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes for the two-currency cash ledger
//! - Presence-aware partial update fields
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
