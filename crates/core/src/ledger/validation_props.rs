//! Property-based tests for movement validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use staybook_shared::types::Currency;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{CategoryInfo, MovementDraft, MovementType, Partner};
use super::validation::validate_movement;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-positive amount (<= 0).
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn movement_type() -> impl Strategy<Value = MovementType> {
    prop_oneof![Just(MovementType::Income), Just(MovementType::Expense)]
}

fn category(movement_type: MovementType) -> CategoryInfo {
    CategoryInfo {
        id: Uuid::from_u128(1),
        name: "Any".to_string(),
        movement_type,
    }
}

fn usd_draft(movement_type: MovementType, amount: Decimal, rate: Option<Decimal>) -> MovementDraft {
    MovementDraft {
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        movement_type,
        category_id: Uuid::from_u128(1),
        description: None,
        amount,
        currency: Currency::Usd,
        exchange_rate: rate,
        partner: Partner::All,
        reservation_id: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Foreign currency without a rate always fails; adding a rate fixes it.
    #[test]
    fn prop_foreign_requires_rate(
        movement_type in movement_type(),
        amount in positive_amount(),
        rate in positive_amount(),
    ) {
        let cat = category(movement_type);

        let missing = validate_movement(&usd_draft(movement_type, amount, None), &cat);
        prop_assert!(
            matches!(missing, Err(LedgerError::MissingExchangeRate { .. })),
            "missing rate should be rejected, got: {:?}",
            missing
        );

        let draft = usd_draft(movement_type, amount, Some(rate));
        prop_assert!(validate_movement(&draft, &cat).is_ok());
    }

    /// A type different from the category's always fails citing the category's type.
    #[test]
    fn prop_type_mismatch_cites_category_type(
        category_type in movement_type(),
        amount in positive_amount(),
        rate in positive_amount(),
    ) {
        let other = match category_type {
            MovementType::Income => MovementType::Expense,
            MovementType::Expense => MovementType::Income,
        };
        let draft = usd_draft(other, amount, Some(rate));
        let result = validate_movement(&draft, &category(category_type));

        let err = result.unwrap_err();
        prop_assert!(
            matches!(err, LedgerError::TypeMismatch { required } if required == category_type),
            "expected type mismatch, got: {:?}",
            err
        );
        prop_assert!(err.to_string().contains(category_type.label()));
    }

    /// Non-positive amounts are rejected.
    #[test]
    fn prop_non_positive_amount_rejected(
        movement_type in movement_type(),
        amount in non_positive_amount(),
        rate in positive_amount(),
    ) {
        let draft = usd_draft(movement_type, amount, Some(rate));
        let result = validate_movement(&draft, &category(movement_type));
        prop_assert!(matches!(result, Err(LedgerError::NonPositiveAmount)));
    }
}
