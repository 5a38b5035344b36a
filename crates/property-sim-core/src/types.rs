use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Purchase and rental parameters of a single property.
///
/// Recurring costs (`insurance`, `service_charge`, `ground_rent`) are monthly
/// amounts. Appreciation rates are annual fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub purchase_price: Money,
    pub monthly_rent: Money,
    #[serde(default)]
    pub insurance: Money,
    #[serde(default)]
    pub service_charge: Money,
    #[serde(default)]
    pub ground_rent: Money,
    #[serde(default)]
    pub annual_price_appreciation: Rate,
    #[serde(default)]
    pub annual_rent_appreciation: Rate,
}

impl PropertyDetails {
    /// Fixed monthly outgoings that do not depend on rent or financing.
    pub fn fixed_monthly_costs(&self) -> Money {
        self.insurance + self.service_charge + self.ground_rent
    }
}

/// Financing plan and one-off acquisition costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDetails {
    pub down_payment: Money,
    /// Annual mortgage rate (0.045 = 4.5%)
    pub interest_rate: Rate,
    pub payment_term_years: u32,
    #[serde(default)]
    pub legal_fees: Money,
    #[serde(default)]
    pub refurbishment_cost: Money,
    #[serde(default)]
    pub furnishing_cost: Money,
}

impl InvestmentDetails {
    /// Amount borrowed against the property. Not floored at zero.
    pub fn loan_amount(&self, purchase_price: Money) -> Money {
        purchase_price - self.down_payment
    }

    /// One-off costs paid in cash on top of the deposit, excluding tax.
    pub fn acquisition_costs(&self) -> Money {
        self.legal_fees + self.refurbishment_cost + self.furnishing_cost
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// `elapsed_us` is the only field that varies between identical calls.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
