use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropertySimError;
use crate::time_value::{annuity_payment, overflow, round_currency, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropertySimResult;

/// Repayment mortgage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub principal: Money,
    pub payment_term_years: u32,
    /// Annual rate as a fraction (0.045 = 4.5%)
    pub annual_interest_rate: Rate,
}

/// One year of the amortization schedule.
///
/// Year 0 is the position before any payment: nothing paid, the full
/// principal outstanding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub closing_balance: Money,
    pub total_payment: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// Monthly payment and the yearly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub monthly_payment: Money,
    pub schedule: Vec<AmortizationYear>,
    pub total_interest: Money,
    pub total_paid: Money,
}

/// Fixed monthly payment for a repayment mortgage.
///
/// A zero rate repays the principal in equal instalments.
pub fn monthly_payment(
    principal: Money,
    payment_term_years: u32,
    annual_interest_rate: Rate,
) -> PropertySimResult<Money> {
    let months = validate(principal, payment_term_years)?;
    annuity_payment(principal, annual_interest_rate / dec!(12), months)
}

/// Year-by-year schedule, indexed by year with the synthetic year 0 first.
pub fn amortization_schedule(
    principal: Money,
    payment_term_years: u32,
    annual_interest_rate: Rate,
) -> PropertySimResult<Vec<AmortizationYear>> {
    amortize(principal, payment_term_years, annual_interest_rate).map(|out| out.schedule)
}

/// Monthly payment, schedule and totals from a single pass.
///
/// The monthly recurrence runs at full precision. Cumulative columns are
/// rounded to pence and each year's figures are the difference between
/// consecutive rounded cumulatives, so the yearly rows sum exactly to the
/// final cumulative totals.
pub fn amortize(
    principal: Money,
    payment_term_years: u32,
    annual_interest_rate: Rate,
) -> PropertySimResult<AmortizationOutput> {
    let payment = monthly_payment(principal, payment_term_years, annual_interest_rate)?;
    let schedule = build_schedule(
        principal,
        payment,
        payment_term_years,
        annual_interest_rate / dec!(12),
    )?;

    let (total_interest, total_principal) = schedule
        .last()
        .map(|y| (y.cumulative_interest, y.cumulative_principal))
        .unwrap_or_default();

    Ok(AmortizationOutput {
        monthly_payment: payment,
        schedule,
        total_interest,
        total_paid: total_interest + total_principal,
    })
}

/// Schedule plus totals, wrapped in the standard output envelope.
pub fn build_amortization_schedule(
    input: &MortgageInput,
) -> PropertySimResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.annual_interest_rate.is_zero() {
        warnings.push("Zero interest rate: principal repaid in equal instalments".into());
    }
    if input.annual_interest_rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative interest rate {}. Verify the rate is a fraction, not a percentage",
            input.annual_interest_rate
        ));
    }
    if input.annual_interest_rate > dec!(0.15) {
        warnings.push(format!(
            "Interest rate {:.2}% exceeds 15%. Was a percentage passed instead of a fraction?",
            input.annual_interest_rate * dec!(100)
        ));
    }

    let output = amortize(
        input.principal,
        input.payment_term_years,
        input.annual_interest_rate,
    )?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Repayment Mortgage Amortization (Monthly Compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Checks the loan and returns the term in months.
fn validate(principal: Money, payment_term_years: u32) -> PropertySimResult<u32> {
    if payment_term_years == 0 {
        return Err(PropertySimError::InvalidInput {
            field: "payment_term_years".into(),
            reason: "Payment term must be at least 1 year".into(),
        });
    }
    if principal < Decimal::ZERO {
        return Err(PropertySimError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must not be negative".into(),
        });
    }
    payment_term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| overflow("payment term in months"))
}

fn build_schedule(
    principal: Money,
    payment: Money,
    payment_term_years: u32,
    monthly_rate: Rate,
) -> PropertySimResult<Vec<AmortizationYear>> {
    let zero = round_currency(Decimal::ZERO);
    let mut schedule = Vec::with_capacity(payment_term_years as usize + 1);
    schedule.push(AmortizationYear {
        year: 0,
        interest_paid: zero,
        principal_paid: zero,
        closing_balance: round_currency(principal),
        total_payment: zero,
        cumulative_interest: zero,
        cumulative_principal: zero,
    });

    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;
    let mut prev_interest = zero;
    let mut prev_principal = zero;

    for year in 1..=payment_term_years {
        for _ in 0..MONTHS_PER_YEAR {
            let interest = balance
                .checked_mul(monthly_rate)
                .ok_or_else(|| overflow("monthly interest"))?;
            let principal_portion = payment - interest;
            balance -= principal_portion;
            cumulative_interest += interest;
            cumulative_principal += principal_portion;
        }

        let rounded_interest = round_currency(cumulative_interest);
        let rounded_principal = round_currency(cumulative_principal);
        let interest_paid = rounded_interest - prev_interest;
        let principal_paid = rounded_principal - prev_principal;

        schedule.push(AmortizationYear {
            year,
            interest_paid,
            principal_paid,
            closing_balance: round_currency(balance),
            total_payment: interest_paid + principal_paid,
            cumulative_interest: rounded_interest,
            cumulative_principal: rounded_principal,
        });

        prev_interest = rounded_interest;
        prev_principal = rounded_principal;
    }

    tracing::debug!(
        %principal,
        %payment,
        years = payment_term_years,
        residual = %balance,
        "amortization schedule built"
    );

    Ok(schedule)
}
