//! Currency codes for the cash ledger.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts travel as `rust_decimal::Decimal` next to one of these codes.

use serde::{Deserialize, Serialize};

/// Currencies the business books movements in.
///
/// `Ars` is the local (functional) currency. `Usd` is the foreign currency and
/// every USD movement carries the exchange rate used to convert it to ARS.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine Peso (local).
    #[default]
    Ars,
    /// US Dollar (foreign).
    Usd,
}

impl Currency {
    /// The local currency.
    pub const LOCAL: Self = Self::Ars;
    /// The foreign currency.
    pub const FOREIGN: Self = Self::Usd;

    /// Returns true if amounts in this currency need an exchange rate.
    #[must_use]
    pub const fn is_foreign(self) -> bool {
        matches!(self, Self::Usd)
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ARS" => Ok(Self::Ars),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
