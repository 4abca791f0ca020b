//! Entity re-exports.

pub use super::categories::Entity as Categories;
pub use super::movements::Entity as Movements;
pub use super::properties::Entity as Properties;
pub use super::reservations::Entity as Reservations;
