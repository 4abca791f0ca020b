//! `SeaORM` entity definitions.
//!
//! Enumerations are stored as their lowercase string form and converted with
//! the `as_str`/`FromStr` pairs of the core types.

pub mod prelude;

pub mod categories;
pub mod movements;
pub mod properties;
pub mod reservations;
