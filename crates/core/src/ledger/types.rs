//! Domain types for the cash ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staybook_shared::types::{Currency, Patch};
use uuid::Uuid;

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

impl MovementType {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown movement type: {s}")),
        }
    }
}

/// Business partner a movement is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partner {
    /// Maxy.
    Maxy,
    /// Oso.
    Oso,
    /// Laura.
    Laura,
    /// Shared by all partners.
    All,
}

impl Partner {
    /// All partners, in display order.
    pub const ALL: [Self; 4] = [Self::Maxy, Self::Oso, Self::Laura, Self::All];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maxy => "maxy",
            Self::Oso => "oso",
            Self::Laura => "laura",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for Partner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Partner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "maxy" => Ok(Self::Maxy),
            "oso" => Ok(Self::Oso),
            "laura" => Ok(Self::Laura),
            "all" | "todos" => Ok(Self::All),
            _ => Err(format!("Unknown partner: {s}")),
        }
    }
}

/// Information about a category needed for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    /// The category ID.
    pub id: Uuid,
    /// Category name.
    pub name: String,
    /// Type every movement in the category must have.
    pub movement_type: MovementType,
}

/// Input for creating a movement.
///
/// Also used as the full value set of a stored movement when applying
/// partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDraft {
    /// Movement date.
    pub date: NaiveDate,
    /// Income or expense.
    pub movement_type: MovementType,
    /// Category the movement belongs to.
    pub category_id: Uuid,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount in `currency`, always positive.
    pub amount: Decimal,
    /// Currency of `amount`, local when omitted.
    #[serde(default)]
    pub currency: Currency,
    /// Foreign-to-local rate, required for foreign currency.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Partner the movement is attributed to.
    pub partner: Partner,
    /// Related reservation.
    #[serde(default)]
    pub reservation_id: Option<Uuid>,
}

/// Partial update for a movement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementPatch {
    /// New date.
    #[serde(default)]
    pub date: Patch<NaiveDate>,
    /// New type.
    #[serde(default)]
    pub movement_type: Patch<MovementType>,
    /// New category.
    #[serde(default)]
    pub category_id: Patch<Uuid>,
    /// New description, `null` clears it.
    #[serde(default)]
    pub description: Patch<String>,
    /// New amount.
    #[serde(default)]
    pub amount: Patch<Decimal>,
    /// New currency.
    #[serde(default)]
    pub currency: Patch<Currency>,
    /// New exchange rate, `null` clears it.
    #[serde(default)]
    pub exchange_rate: Patch<Decimal>,
    /// New partner.
    #[serde(default)]
    pub partner: Patch<Partner>,
    /// New related reservation, `null` unlinks it.
    #[serde(default)]
    pub reservation_id: Patch<Uuid>,
}

/// A movement as seen by the summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    /// Movement date.
    pub date: NaiveDate,
    /// Income or expense.
    pub movement_type: MovementType,
    /// Name of the movement's category.
    pub category_name: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Foreign-to-local rate.
    pub exchange_rate: Option<Decimal>,
    /// Partner.
    pub partner: Partner,
}
