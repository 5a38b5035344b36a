use rust_decimal_macros::dec;

use crate::time_value::overflow;
use crate::types::Money;
use crate::PropertySimResult;

/// Rent left over after monthly running costs. Negative when the property
/// costs more than it earns.
pub fn monthly_net_income(monthly_rent: Money, monthly_running_cost: Money) -> Money {
    monthly_rent - monthly_running_cost
}

/// Annualised net cash flow.
pub fn annual_cash_flow(monthly_net_income: Money) -> PropertySimResult<Money> {
    monthly_net_income
        .checked_mul(dec!(12))
        .ok_or_else(|| overflow("annual cash flow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_cash_flow() {
        let net = monthly_net_income(dec!(1200), dec!(950));
        assert_eq!(net, dec!(250));
        assert_eq!(annual_cash_flow(net).unwrap(), dec!(3000));
    }

    #[test]
    fn test_negative_cash_flow() {
        let net = monthly_net_income(dec!(900), dec!(1000));
        assert_eq!(annual_cash_flow(net).unwrap(), dec!(-1200));
    }

    #[test]
    fn test_annualising_past_decimal_range() {
        assert!(annual_cash_flow(rust_decimal::Decimal::MAX).is_err());
    }
}
