//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod error;
pub mod import;
pub mod movement;
pub mod property;
pub mod report;
pub mod reservation;

pub use category::{CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use error::{ImportError, LedgerStoreError, ReservationStoreError};
pub use import::ImportRepository;
pub use movement::{MovementFilter, MovementRepository, MovementWithCategory};
pub use property::{CreatePropertyInput, PropertyRepository, UpdatePropertyInput};
pub use report::ReportRepository;
pub use reservation::{ReservationFilter, ReservationRepository, ReservationWithProperty};
