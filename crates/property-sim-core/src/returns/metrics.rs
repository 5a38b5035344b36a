use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PropertySimError;
use crate::time_value::overflow;
use crate::types::{InvestmentDetails, Money, Rate};
use crate::PropertySimResult;

/// Cash the investor puts in up front: deposit, stamp duty, legal fees,
/// refurbishment and furnishing.
pub fn total_cash_investment(investment: &InvestmentDetails, stamp_duty: Money) -> Money {
    investment.down_payment + stamp_duty + investment.acquisition_costs()
}

/// Annual rent over purchase price.
pub fn gross_yield(monthly_rent: Money, purchase_price: Money) -> PropertySimResult<Rate> {
    let annual_rent = monthly_rent
        .checked_mul(dec!(12))
        .ok_or_else(|| overflow("annual rent"))?;
    ratio(annual_rent, purchase_price, "gross yield (purchase_price)")
}

/// Annual net cash flow over purchase price.
pub fn net_yield(annual_cash_flow: Money, purchase_price: Money) -> PropertySimResult<Rate> {
    ratio(annual_cash_flow, purchase_price, "net yield (purchase_price)")
}

/// Annual net cash flow over total cash invested.
pub fn rental_roi(annual_cash_flow: Money, total_cash_investment: Money) -> PropertySimResult<Rate> {
    ratio(
        annual_cash_flow,
        total_cash_investment,
        "rental ROI (total_cash_investment)",
    )
}

/// Equity held over total cash invested.
pub fn equity_roi(equity: Money, total_cash_investment: Money) -> PropertySimResult<Rate> {
    ratio(equity, total_cash_investment, "equity ROI (total_cash_investment)")
}

fn ratio(numerator: Decimal, denominator: Decimal, context: &str) -> PropertySimResult<Rate> {
    if denominator.is_zero() {
        return Err(PropertySimError::DivisionByZero {
            context: context.into(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}
