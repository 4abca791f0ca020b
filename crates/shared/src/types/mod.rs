//! Common types used across the application.

pub mod money;
pub mod pagination;
pub mod patch;

pub use money::Currency;
pub use pagination::PageRequest;
pub use patch::Patch;
