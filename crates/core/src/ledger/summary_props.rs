//! Property-based tests for ledger summaries.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use staybook_shared::types::Currency;

use super::summary::SummaryService;
use super::types::{LedgerLine, MovementType, Partner};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an exchange rate from 1.0000 to 2000.0000.
fn exchange_rate() -> impl Strategy<Value = Decimal> {
    (10_000i64..20_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn movement_type() -> impl Strategy<Value = MovementType> {
    prop_oneof![Just(MovementType::Income), Just(MovementType::Expense)]
}

fn partner() -> impl Strategy<Value = Partner> {
    prop::sample::select(Partner::ALL.to_vec())
}

/// Strategy for a valid ledger line dated within 2024.
fn ledger_line() -> impl Strategy<Value = LedgerLine> {
    (
        0u64..366,
        movement_type(),
        prop::sample::select(vec!["Rentals", "Cleaning", "Repairs", "Taxes"]),
        positive_amount(),
        any::<bool>(),
        exchange_rate(),
        partner(),
    )
        .prop_map(|(offset, movement_type, category, amount, foreign, rate, partner)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_days(Days::new(offset))
                .unwrap();
            LedgerLine {
                date,
                movement_type,
                category_name: category.to_string(),
                amount,
                currency: if foreign { Currency::Usd } else { Currency::Ars },
                exchange_rate: foreign.then_some(rate),
                partner,
            }
        })
}

fn year_2024() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balances are income minus expense per currency.
    #[test]
    fn prop_balances_match_totals(lines in prop::collection::vec(ledger_line(), 0..50)) {
        let (desde, hasta) = year_2024();
        let summary = SummaryService::summarize(desde, hasta, &lines).unwrap();

        prop_assert_eq!(summary.balance_ars, summary.total_income_ars - summary.total_expense_ars);
        prop_assert_eq!(summary.balance_usd, summary.total_income_usd - summary.total_expense_usd);
    }

    /// Partner buckets add up to the overall totals.
    #[test]
    fn prop_partner_breakdown_sums_to_totals(lines in prop::collection::vec(ledger_line(), 0..50)) {
        let (desde, hasta) = year_2024();
        let summary = SummaryService::summarize(desde, hasta, &lines).unwrap();

        let income_ars: Decimal = summary.by_partner.values().map(|t| t.income_ars).sum();
        let expense_usd: Decimal = summary.by_partner.values().map(|t| t.expense_usd).sum();
        prop_assert_eq!(summary.by_partner.len(), Partner::ALL.len());
        prop_assert_eq!(income_ars, summary.total_income_ars);
        prop_assert_eq!(expense_usd, summary.total_expense_usd);
    }

    /// Reordering the input never changes the summary.
    #[test]
    fn prop_summary_is_order_independent(
        lines in prop::collection::vec(ledger_line(), 0..50),
        seed in any::<u64>(),
    ) {
        let (desde, hasta) = year_2024();
        let mut shuffled = lines.clone();
        // Deterministic rotation plus reversal.
        if !shuffled.is_empty() {
            let k = usize::try_from(seed % shuffled.len() as u64).unwrap();
            shuffled.rotate_left(k);
            shuffled.reverse();
        }

        let a = SummaryService::summarize(desde, hasta, &lines).unwrap();
        let b = SummaryService::summarize(desde, hasta, &shuffled).unwrap();
        prop_assert_eq!(a, b);
    }

    /// The rollup always has 12 months and keeps the reservation counts.
    #[test]
    fn prop_monthly_has_twelve_months(
        lines in prop::collection::vec(ledger_line(), 0..50),
        counts in prop::array::uniform12(0u64..20),
    ) {
        let months = SummaryService::monthly(2024, &lines, &counts).unwrap();

        prop_assert_eq!(months.len(), 12);
        for (i, month) in months.iter().enumerate() {
            prop_assert_eq!(month.month as usize, i + 1);
            prop_assert_eq!(month.balance_ars, month.total_income_ars - month.total_expense_ars);
        }
        let total: u64 = months.iter().map(|m| m.reservation_count).sum();
        prop_assert_eq!(total, counts.iter().sum::<u64>());
    }

    /// Monthly income adds up to the yearly signed category totals.
    #[test]
    fn prop_monthly_matches_yearly_category_totals(
        lines in prop::collection::vec(ledger_line(), 0..50),
    ) {
        let (desde, hasta) = year_2024();
        let summary = SummaryService::summarize(desde, hasta, &lines).unwrap();
        let months = SummaryService::monthly(2024, &lines, &[0; 12]).unwrap();

        let yearly: Decimal = months.iter().map(|m| m.balance_ars).sum();
        let by_category: Decimal = summary.by_category.values().copied().sum();
        prop_assert_eq!(yearly, by_category);
    }
}
