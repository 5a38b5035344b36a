use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropertySimError;
use crate::mortgage::amortization::{amortize, AmortizationYear};
use crate::rental::income::{annual_cash_flow, monthly_net_income};
use crate::rental::running_costs::{running_cost_breakdown, RunningCostBreakdown, RunningCostConfig};
use crate::returns::equity::{equity_growth, forecast_property_value};
use crate::returns::metrics;
use crate::tax::stamp_duty::{stamp_duty, InvestorCategory, StampDutyTable};
use crate::time_value::{growth_factor, overflow};
use crate::types::{
    with_metadata, ComputationOutput, InvestmentDetails, Money, PropertyDetails, Rate,
};
use crate::PropertySimResult;

/// Loan-to-value above which lenders typically decline buy-to-let lending.
const MAX_TYPICAL_LTV: Decimal = dec!(0.75);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How gross and net yield are reported for years after the purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldMode {
    /// Every row repeats the year-0 yields
    #[default]
    Frozen,
    /// Each row uses that year's appreciated rent and cash flow
    Recomputed,
}

/// Everything needed to project one purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub property: PropertyDetails,
    pub investment: InvestmentDetails,
    pub investor_category: InvestorCategory,
    /// Number of rows to produce, year 0 included
    pub number_of_years: u32,
    #[serde(default)]
    pub running_costs: RunningCostConfig,
    #[serde(default)]
    pub yield_mode: YieldMode,
    /// Custom stamp duty brackets; the built-in table is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_duty_table: Option<StampDutyTable>,
}

/// Investment performance for one simulated year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyMetrics {
    pub year: u32,
    pub gross_yield: Rate,
    pub net_yield: Rate,
    pub rental_roi: Rate,
    /// Year 0: the cash deposit. Later years: property value less mortgage balance.
    pub equity: Money,
    pub equity_roi: Rate,
    pub monthly_rent: Money,
    pub monthly_running_cost: Money,
    pub annual_cash_flow: Money,
    pub property_value: Money,
}

/// Result of a multi-year projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub total_cash_investment: Money,
    pub monthly_mortgage_payment: Money,
    pub stamp_duty: Money,
    pub loan_amount: Money,
    pub loan_to_value: Rate,
    /// Year-0 monthly running costs by line item
    pub running_costs: RunningCostBreakdown,
    pub amortization_schedule: Vec<AmortizationYear>,
    pub yearly_metrics: Vec<YearlyMetrics>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a purchase over `number_of_years`, wrapped in the standard
/// output envelope with warnings for risky assumptions.
pub fn run_simulation(
    input: &SimulationInput,
) -> PropertySimResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();

    let output = simulate(input)?;
    let warnings = collect_warnings(input, &output);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy-to-Let Investment Projection (Compound Appreciation, Monthly Amortization)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Project a purchase over `number_of_years`.
///
/// Rows are produced in ascending year order starting at year 0. The first
/// calculator error aborts the projection.
#[tracing::instrument(
    skip_all,
    fields(years = input.number_of_years, category = %input.investor_category)
)]
pub fn simulate(input: &SimulationInput) -> PropertySimResult<SimulationOutput> {
    validate_input(input)?;

    let property = &input.property;
    let investment = &input.investment;

    // --- Year-0 setup ---
    let table = input.stamp_duty_table.clone().unwrap_or_default();
    let duty = stamp_duty(property.purchase_price, input.investor_category, &table)?;

    let loan_amount = investment.loan_amount(property.purchase_price);
    let mortgage = amortize(
        loan_amount,
        investment.payment_term_years,
        investment.interest_rate,
    )?;
    let mortgage_payment = mortgage.monthly_payment;
    let schedule = mortgage.schedule;

    let running_costs = running_cost_breakdown(mortgage_payment, property, &input.running_costs);
    let total_cash_investment = metrics::total_cash_investment(investment, duty);

    let net_income = monthly_net_income(property.monthly_rent, running_costs.total);
    let cash_flow = annual_cash_flow(net_income)?;
    let base_gross_yield = metrics::gross_yield(property.monthly_rent, property.purchase_price)?;
    let base_net_yield = metrics::net_yield(cash_flow, property.purchase_price)?;

    let mut yearly_metrics = Vec::with_capacity(input.number_of_years as usize);
    yearly_metrics.push(YearlyMetrics {
        year: 0,
        gross_yield: base_gross_yield,
        net_yield: base_net_yield,
        rental_roi: metrics::rental_roi(cash_flow, total_cash_investment)?,
        equity: investment.down_payment,
        equity_roi: metrics::equity_roi(investment.down_payment, total_cash_investment)?,
        monthly_rent: property.monthly_rent,
        monthly_running_cost: running_costs.total,
        annual_cash_flow: cash_flow,
        property_value: property.purchase_price,
    });

    // --- Years 1..N-1 ---
    for year in 1..input.number_of_years {
        let rent_factor = growth_factor(property.annual_rent_appreciation, year)?;
        let monthly_rent = property
            .monthly_rent
            .checked_mul(rent_factor)
            .ok_or_else(|| overflow("appreciated rent"))?;
        let monthly_running_cost = running_costs
            .total
            .checked_mul(rent_factor)
            .ok_or_else(|| overflow("appreciated running cost"))?;

        let cash_flow = annual_cash_flow(monthly_net_income(monthly_rent, monthly_running_cost))?;

        let property_value = forecast_property_value(
            property.purchase_price,
            property.annual_price_appreciation,
            year,
        )?;
        let equity = equity_growth(property_value, &schedule, year)?;

        let (gross_yield, net_yield) = match input.yield_mode {
            YieldMode::Frozen => (base_gross_yield, base_net_yield),
            YieldMode::Recomputed => (
                metrics::gross_yield(monthly_rent, property.purchase_price)?,
                metrics::net_yield(cash_flow, property.purchase_price)?,
            ),
        };

        yearly_metrics.push(YearlyMetrics {
            year,
            gross_yield,
            net_yield,
            rental_roi: metrics::rental_roi(cash_flow, total_cash_investment)?,
            equity,
            equity_roi: metrics::equity_roi(equity, total_cash_investment)?,
            monthly_rent,
            monthly_running_cost,
            annual_cash_flow: cash_flow,
            property_value,
        });
    }

    tracing::debug!(
        %total_cash_investment,
        %mortgage_payment,
        rows = yearly_metrics.len(),
        "simulation complete"
    );

    Ok(SimulationOutput {
        total_cash_investment,
        monthly_mortgage_payment: mortgage_payment,
        stamp_duty: duty,
        loan_amount,
        loan_to_value: loan_amount / property.purchase_price,
        running_costs,
        amortization_schedule: schedule,
        yearly_metrics,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &SimulationInput) -> PropertySimResult<()> {
    let property = &input.property;
    let investment = &input.investment;

    if input.number_of_years == 0 {
        return Err(PropertySimError::InvalidInput {
            field: "number_of_years".into(),
            reason: "Simulation must cover at least 1 year".into(),
        });
    }

    if property.purchase_price <= Decimal::ZERO {
        return Err(PropertySimError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }

    if investment.payment_term_years == 0 {
        return Err(PropertySimError::InvalidInput {
            field: "payment_term_years".into(),
            reason: "Payment term must be at least 1 year".into(),
        });
    }

    if investment.down_payment < Decimal::ZERO {
        return Err(PropertySimError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must not be negative".into(),
        });
    }

    if investment.down_payment > property.purchase_price {
        return Err(PropertySimError::InvalidInput {
            field: "down_payment".into(),
            reason: format!(
                "Down payment {} exceeds purchase price {}",
                investment.down_payment, property.purchase_price
            ),
        });
    }

    input.running_costs.validate()
}

fn collect_warnings(input: &SimulationInput, output: &SimulationOutput) -> Vec<String> {
    let mut warnings = Vec::new();

    if output.loan_to_value > MAX_TYPICAL_LTV {
        warnings.push(format!(
            "LTV of {:.1}% exceeds {:.0}%. Minimum deposit for this price is {:.2}",
            output.loan_to_value * dec!(100),
            MAX_TYPICAL_LTV * dec!(100),
            input.property.purchase_price * (Decimal::ONE - MAX_TYPICAL_LTV)
        ));
    }

    if let Some(first) = output.yearly_metrics.first() {
        if first.annual_cash_flow < Decimal::ZERO {
            warnings.push(format!(
                "Negative cash flow of {:.2} in year 0: rent does not cover running costs",
                first.annual_cash_flow
            ));
        }
    }

    if input.yield_mode == YieldMode::Frozen
        && !input.property.annual_rent_appreciation.is_zero()
        && input.number_of_years > 1
    {
        warnings.push(
            "Gross and net yields are frozen at year-0 values while rent appreciates".into(),
        );
    }

    warnings
}
