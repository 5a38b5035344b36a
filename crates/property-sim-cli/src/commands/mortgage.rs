use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_sim_core::mortgage::amortization::{self, MortgageInput};

use crate::input;

/// Arguments for a mortgage amortization schedule
#[derive(Args)]
pub struct MortgageArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Annual interest rate (0.045 or 4.5%)
    #[arg(long, value_parser = input::rate::parse_rate)]
    pub rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        MortgageInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            payment_term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            annual_interest_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
        }
    };

    let result = amortization::build_amortization_schedule(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
