//! Ledger summaries: period totals, breakdowns, and monthly rollups.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staybook_shared::types::Currency;

use super::conversion::{accumulate, to_local};
use super::error::LedgerError;
use super::types::{LedgerLine, MovementType, Partner};

/// Income and expense per currency for one partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTotals {
    /// Income in local currency.
    pub income_ars: Decimal,
    /// Expense in local currency.
    pub expense_ars: Decimal,
    /// Income in foreign currency.
    pub income_usd: Decimal,
    /// Expense in foreign currency.
    pub expense_usd: Decimal,
}

impl PartnerTotals {
    fn add(
        &mut self,
        movement_type: MovementType,
        currency: Currency,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let bucket = match (movement_type, currency) {
            (MovementType::Income, Currency::Ars) => &mut self.income_ars,
            (MovementType::Expense, Currency::Ars) => &mut self.expense_ars,
            (MovementType::Income, Currency::Usd) => &mut self.income_usd,
            (MovementType::Expense, Currency::Usd) => &mut self.expense_usd,
        };
        accumulate(bucket, amount)
    }

    fn balance_ars(&self) -> Result<Decimal, LedgerError> {
        self.income_ars
            .checked_sub(self.expense_ars)
            .ok_or(LedgerError::TotalOverflow)
    }

    fn balance_usd(&self) -> Result<Decimal, LedgerError> {
        self.income_usd
            .checked_sub(self.expense_usd)
            .ok_or(LedgerError::TotalOverflow)
    }
}

/// Cash summary for a closed date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Window start (inclusive).
    pub desde: NaiveDate,
    /// Window end (inclusive).
    pub hasta: NaiveDate,
    /// Local currency income.
    pub total_income_ars: Decimal,
    /// Local currency expense.
    pub total_expense_ars: Decimal,
    /// Local income minus local expense.
    pub balance_ars: Decimal,
    /// Foreign currency income.
    pub total_income_usd: Decimal,
    /// Foreign currency expense.
    pub total_expense_usd: Decimal,
    /// Foreign income minus foreign expense.
    pub balance_usd: Decimal,
    /// Totals per partner, every partner present.
    pub by_partner: BTreeMap<Partner, PartnerTotals>,
    /// Signed local-currency total per category name.
    pub by_category: BTreeMap<String, Decimal>,
}

/// One month of the yearly rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Income converted to local currency.
    pub total_income_ars: Decimal,
    /// Expense converted to local currency.
    pub total_expense_ars: Decimal,
    /// Income minus expense.
    pub balance_ars: Decimal,
    /// Reservations checking in during the month.
    pub reservation_count: u64,
}

/// Returns the first and last day of a month.
///
/// # Errors
///
/// Returns `LedgerError::InvalidYear` if the month does not exist in the calendar.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), LedgerError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(LedgerError::InvalidYear(year))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(LedgerError::InvalidYear(year))?;
    Ok((first, last))
}

/// Returns the first and last day of a year.
///
/// # Errors
///
/// Returns `LedgerError::InvalidYear` if the year is out of range.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), LedgerError> {
    let (first, _) = month_bounds(year, 1)?;
    let (_, last) = month_bounds(year, 12)?;
    Ok((first, last))
}

/// Service for aggregating movements.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes the movements of `[desde, hasta]`.
    ///
    /// Lines outside the window are ignored. Per-currency totals are never
    /// converted; category totals are in local currency.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidWindow` if `desde > hasta` and
    /// `LedgerError::TotalOverflow` if a total leaves the `Decimal` range.
    pub fn summarize<'a, I>(
        desde: NaiveDate,
        hasta: NaiveDate,
        lines: I,
    ) -> Result<LedgerSummary, LedgerError>
    where
        I: IntoIterator<Item = &'a LedgerLine>,
    {
        if desde > hasta {
            return Err(LedgerError::InvalidWindow { desde, hasta });
        }

        let mut totals = PartnerTotals::default();
        let mut by_partner: BTreeMap<Partner, PartnerTotals> = Partner::ALL
            .into_iter()
            .map(|p| (p, PartnerTotals::default()))
            .collect();
        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();

        for line in lines {
            if line.date < desde || line.date > hasta {
                continue;
            }

            totals.add(line.movement_type, line.currency, line.amount)?;
            by_partner
                .entry(line.partner)
                .or_default()
                .add(line.movement_type, line.currency, line.amount)?;

            let local = to_local(line.amount, line.currency, line.exchange_rate)?;
            let signed = match line.movement_type {
                MovementType::Income => local,
                MovementType::Expense => -local,
            };
            accumulate(
                by_category.entry(line.category_name.clone()).or_default(),
                signed,
            )?;
        }

        Ok(LedgerSummary {
            desde,
            hasta,
            total_income_ars: totals.income_ars,
            total_expense_ars: totals.expense_ars,
            balance_ars: totals.balance_ars()?,
            total_income_usd: totals.income_usd,
            total_expense_usd: totals.expense_usd,
            balance_usd: totals.balance_usd()?,
            by_partner,
            by_category,
        })
    }

    /// Rolls a year of movements up into 12 months.
    ///
    /// `reservation_counts[i]` is the number of reservations checking in
    /// during month `i + 1`. Lines outside `year` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidYear` if the year is out of range and
    /// `LedgerError::TotalOverflow` if a total leaves the `Decimal` range.
    pub fn monthly<'a, I>(
        year: i32,
        lines: I,
        reservation_counts: &[u64; 12],
    ) -> Result<Vec<MonthSummary>, LedgerError>
    where
        I: IntoIterator<Item = &'a LedgerLine>,
    {
        let (first, last) = year_bounds(year)?;
        let mut months: Vec<MonthSummary> = (1..=12)
            .zip(reservation_counts)
            .map(|(month, &reservation_count)| MonthSummary {
                year,
                month,
                total_income_ars: Decimal::ZERO,
                total_expense_ars: Decimal::ZERO,
                balance_ars: Decimal::ZERO,
                reservation_count,
            })
            .collect();

        for line in lines {
            if line.date < first || line.date > last {
                continue;
            }
            let index = line.date.month0() as usize;
            let local = to_local(line.amount, line.currency, line.exchange_rate)?;
            let month = &mut months[index];
            match line.movement_type {
                MovementType::Income => accumulate(&mut month.total_income_ars, local)?,
                MovementType::Expense => accumulate(&mut month.total_expense_ars, local)?,
            }
        }

        for month in &mut months {
            month.balance_ars = month
                .total_income_ars
                .checked_sub(month.total_expense_ars)
                .ok_or(LedgerError::TotalOverflow)?;
        }

        Ok(months)
    }
}
