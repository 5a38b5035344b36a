use crate::error::PropertySimError;
use crate::mortgage::amortization::AmortizationYear;
use crate::time_value::compound;
use crate::types::{Money, Rate};
use crate::PropertySimResult;

/// Market value after `year` years of compound appreciation.
pub fn forecast_property_value(
    purchase_price: Money,
    annual_appreciation: Rate,
    year: u32,
) -> PropertySimResult<Money> {
    compound(purchase_price, annual_appreciation, year)
}

/// Owner's equity at `year`: property value less the mortgage balance
/// outstanding at the end of that year.
pub fn equity_growth(
    property_value: Money,
    schedule: &[AmortizationYear],
    year: u32,
) -> PropertySimResult<Money> {
    let row = schedule
        .iter()
        .find(|row| row.year == year)
        .ok_or_else(|| PropertySimError::YearOutOfRange {
            year,
            max_year: schedule.last().map_or(0, |row| row.year),
        })?;
    Ok(property_value - row.closing_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::amortization::amortization_schedule;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_forecast_compounds_annually() {
        // 200k * 1.05^2 = 220,500
        assert_eq!(forecast_property_value(dec!(200000), dec!(0.05), 2).unwrap(), dec!(220500));
        assert_eq!(forecast_property_value(dec!(200000), dec!(0.05), 0).unwrap(), dec!(200000));
    }

    #[test]
    fn test_forecast_overflow_is_an_error() {
        let err = forecast_property_value(dec!(200000), dec!(3), 60).unwrap_err();
        assert!(matches!(err, PropertySimError::Overflow { .. }));
    }

    #[test]
    fn test_year_zero_equity_is_deposit() {
        let price = dec!(250000);
        let principal = dec!(187500);
        let schedule = amortization_schedule(principal, 25, dec!(0.04)).unwrap();
        let value = forecast_property_value(price, Decimal::ZERO, 0).unwrap();
        assert_eq!(equity_growth(value, &schedule, 0).unwrap(), dec!(62500));
    }

    #[test]
    fn test_equity_rises_with_amortization() {
        let schedule = amortization_schedule(dec!(150000), 20, dec!(0.05)).unwrap();
        let value = dec!(200000);
        let e1 = equity_growth(value, &schedule, 1).unwrap();
        let e10 = equity_growth(value, &schedule, 10).unwrap();
        assert!(e10 > e1);
        assert!((equity_growth(value, &schedule, 20).unwrap() - value).abs() <= dec!(0.01));
    }

    #[test]
    fn test_year_beyond_schedule() {
        let schedule = amortization_schedule(dec!(150000), 5, dec!(0.05)).unwrap();
        let err = equity_growth(dec!(200000), &schedule, 6).unwrap_err();
        match err {
            PropertySimError::YearOutOfRange { year, max_year } => {
                assert_eq!(year, 6);
                assert_eq!(max_year, 5);
            }
            other => panic!("Expected YearOutOfRange, got {other:?}"),
        }
    }
}
