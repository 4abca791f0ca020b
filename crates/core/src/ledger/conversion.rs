//! Foreign-to-local currency conversion.
//!
//! Each movement is converted on its own as `amount * rate`, unrounded.
//! Overflow is reported instead of panicking.

use rust_decimal::Decimal;
use staybook_shared::types::Currency;

use super::error::LedgerError;

/// Returns the amount expressed in local currency.
///
/// Local amounts pass through unchanged. A foreign amount without a rate
/// cannot be produced by validation and converts at zero.
///
/// # Errors
///
/// Returns `LedgerError::TotalOverflow` if the product does not fit a `Decimal`.
pub fn to_local(
    amount: Decimal,
    currency: Currency,
    exchange_rate: Option<Decimal>,
) -> Result<Decimal, LedgerError> {
    if !currency.is_foreign() {
        return Ok(amount);
    }
    match exchange_rate {
        None => Ok(Decimal::ZERO),
        Some(rate) => amount.checked_mul(rate).ok_or(LedgerError::TotalOverflow),
    }
}

/// Adds `amount` to `total`.
///
/// # Errors
///
/// Returns `LedgerError::TotalOverflow` if the sum does not fit a `Decimal`.
pub fn accumulate(total: &mut Decimal, amount: Decimal) -> Result<(), LedgerError> {
    *total = total.checked_add(amount).ok_or(LedgerError::TotalOverflow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_local() {
        assert_eq!(to_local(dec!(250.75), Currency::Ars, None).unwrap(), dec!(250.75));
        assert_eq!(
            to_local(dec!(100), Currency::Usd, Some(dec!(1050))).unwrap(),
            dec!(105000)
        );
        assert_eq!(to_local(dec!(10), Currency::Usd, None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_to_local_keeps_full_precision() {
        assert_eq!(
            to_local(dec!(10.01), Currency::Usd, Some(dec!(999.5))).unwrap(),
            dec!(10004.995)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            to_local(Decimal::MAX, Currency::Usd, Some(dec!(2))),
            Err(LedgerError::TotalOverflow)
        ));

        let mut total = Decimal::MAX;
        assert!(matches!(
            accumulate(&mut total, dec!(1)),
            Err(LedgerError::TotalOverflow)
        ));
        assert_eq!(total, Decimal::MAX);
    }
}
