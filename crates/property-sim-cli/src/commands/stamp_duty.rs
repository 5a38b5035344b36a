use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_sim_core::tax::stamp_duty::{self, InvestorCategory, StampDutyInput};

use crate::input;

/// Arguments for stamp duty calculation
#[derive(Args)]
pub struct StampDutyArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Investor category (sole-trader, limited-company)
    #[arg(long, default_value = "sole-trader")]
    pub category: InvestorCategory,

    /// Path to JSON/YAML file with a custom bracket table
    #[arg(long)]
    pub table: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_stamp_duty(args: StampDutyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let duty_input: StampDutyInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        StampDutyInput {
            purchase_price: args.price.ok_or("--price is required (or provide --input)")?,
            investor_category: args.category,
            table: args
                .table
                .as_deref()
                .map(input::file::read_input)
                .transpose()?,
        }
    };

    let result = stamp_duty::assess_stamp_duty(&duty_input)?;
    Ok(serde_json::to_value(result)?)
}
