use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PropertySimError;
use crate::types::{Money, Rate};
use crate::PropertySimResult;

/// Number of monthly periods in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Growth factor `(1 + rate)^periods` via iterative multiplication.
///
/// Integer periods only, so the result is exact to Decimal precision.
/// A factor beyond Decimal's range is an `Overflow` error.
pub fn growth_factor(rate: Rate, periods: u32) -> PropertySimResult<Decimal> {
    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| overflow("growth rate"))?;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(one_plus_r).ok_or_else(|| overflow("growth factor"))?;
    }
    Ok(factor)
}

/// Value after `periods` of compound growth at `rate`.
pub fn compound(value: Money, rate: Rate, periods: u32) -> PropertySimResult<Money> {
    value
        .checked_mul(growth_factor(rate, periods)?)
        .ok_or_else(|| overflow("compounded value"))
}

/// Level payment that fully repays `principal` over `periods` at `periodic_rate`.
///
/// `P * r / (1 - (1 + r)^-n)`, or straight-line `P / n` when the rate is zero.
pub fn annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> PropertySimResult<Money> {
    if periods == 0 {
        return Err(PropertySimError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let compound = growth_factor(periodic_rate, periods)?;
    if compound.is_zero() {
        return Err(PropertySimError::DivisionByZero {
            context: "annuity discount factor".into(),
        });
    }

    let discount = Decimal::ONE
        .checked_div(compound)
        .ok_or_else(|| overflow("annuity discount factor"))?;
    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        return Err(PropertySimError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(|| overflow("annuity payment"))
}

pub(crate) fn overflow(context: &str) -> PropertySimError {
    PropertySimError::Overflow {
        context: context.into(),
    }
}

/// Round a currency amount to pence, half away from zero.
///
/// Residuals that round to zero come back as a positive `0.00`.
pub fn round_currency(value: Money) -> Money {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::new(0, 2)
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_growth_factor_three_years() {
        // 1.1^3 = 1.331
        assert_eq!(growth_factor(dec!(0.10), 3).unwrap(), dec!(1.331));
    }

    #[test]
    fn test_growth_factor_zero_periods() {
        assert_eq!(growth_factor(dec!(0.07), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_negative_rate() {
        // 1000 * 0.9^2 = 810
        assert_eq!(compound(dec!(1000), dec!(-0.10), 2).unwrap(), dec!(810));
    }

    #[test]
    fn test_growth_factor_overflow_is_an_error() {
        // 4^60 is past Decimal's ~7.9e28 ceiling
        let err = growth_factor(dec!(3), 60).unwrap_err();
        assert!(matches!(err, PropertySimError::Overflow { .. }));
        assert!(compound(dec!(200000), dec!(3), 60).is_err());
    }

    #[test]
    fn test_compound_overflow_at_the_last_step() {
        // The factor itself fits; scaling the value does not
        assert!(growth_factor(dec!(1), 90).is_ok());
        let err = compound(dec!(1000000000), dec!(1), 90).unwrap_err();
        assert!(matches!(err, PropertySimError::Overflow { .. }));
    }

    #[test]
    fn test_annuity_payment_overflow_is_an_error() {
        // A percentage passed as a fraction: 450% a year, monthly
        let err = annuity_payment(dec!(150000), dec!(4.5) / dec!(12), 300).unwrap_err();
        assert!(matches!(err, PropertySimError::Overflow { .. }));
    }

    #[test]
    fn test_annuity_payment_known_answer() {
        // 100k over 25 years at 6%/12: ~644.30/month
        let payment = annuity_payment(dec!(100000), dec!(0.06) / dec!(12), 300).unwrap();
        assert!(
            (payment - dec!(644.30)).abs() < dec!(0.01),
            "Payment {payment} outside expected range"
        );
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(annuity_payment(dec!(1200), Decimal::ZERO, 12).unwrap(), dec!(100));
    }

    #[test]
    fn test_annuity_payment_zero_periods() {
        let err = annuity_payment(dec!(1200), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, PropertySimError::InvalidInput { .. }));
    }

    #[test]
    fn test_round_currency_midpoint() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_currency(dec!(7.1)), dec!(7.10));
    }

    #[test]
    fn test_round_currency_negative_residual() {
        let rounded = round_currency(dec!(-0.0000001));
        assert!(rounded.is_zero());
        assert!(!rounded.is_sign_negative());
    }
}
