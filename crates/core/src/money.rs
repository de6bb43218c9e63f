//! Currency arithmetic helpers.
//!
//! Amounts are `rust_decimal::Decimal` values kept at full precision through
//! every intermediate step. Rounding happens only when a value leaves the domain
//! for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Number of fraction digits shown for currency amounts.
pub const DISPLAY_SCALE: u32 = 2;

/// `amount * rate_percent / 100`, unrounded.
///
/// Falls back to dividing first when the product alone would not fit. Fails
/// only when the result itself is out of range.
pub fn percent_of(amount: Decimal, rate_percent: Decimal) -> DomainResult<Decimal> {
    amount
        .checked_mul(rate_percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| {
            amount
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|hundredth| hundredth.checked_mul(rate_percent))
        })
        .ok_or_else(|| DomainError::out_of_range(format!("{rate_percent}% of {amount}")))
}

/// Round to two fraction digits, half away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Render an amount with exactly two fraction digits (no symbol, no grouping).
pub fn format_amount(amount: Decimal) -> String {
    round_for_display(amount).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn percent_of_keeps_full_precision() {
        assert_eq!(percent_of(d("1000"), d("18")), Ok(d("180")));
        assert_eq!(percent_of(d("0.35"), d("17")), Ok(d("0.0595")));
    }

    #[test]
    fn percent_of_large_amount_divides_first() {
        let amount = d("79000000000000000000000000000");
        assert_eq!(
            percent_of(amount, d("18")),
            Ok(d("14220000000000000000000000000"))
        );
    }

    #[test]
    fn percent_of_unrepresentable_result_is_an_error() {
        let err = percent_of(Decimal::MAX, d("1000")).unwrap_err();
        assert!(matches!(err, DomainError::OutOfRange(_)));
    }

    #[test]
    fn midpoint_rounds_up() {
        assert_eq!(round_for_display(d("0.005")), d("0.01"));
        assert_eq!(round_for_display(d("2.675")), d("2.68"));
        assert_eq!(round_for_display(d("2.674")), d("2.67"));
    }

    #[test]
    fn format_pads_to_two_digits() {
        assert_eq!(format_amount(d("1680")), "1680.00");
        assert_eq!(format_amount(d("0.1")), "0.10");
        assert_eq!(format_amount(d("0.0595")), "0.06");
    }

    #[test]
    fn decimal_sum_has_no_binary_drift() {
        let total = d("0.1") + d("0.2");
        assert_eq!(format_amount(total), "0.30");
        assert_eq!(total, d("0.3"));
    }
}
