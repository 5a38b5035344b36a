use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_sim_core::rental::running_costs::RunningCostConfig;
use property_sim_core::simulation::engine::{self, SimulationInput, YieldMode};
use property_sim_core::tax::stamp_duty::InvestorCategory;
use property_sim_core::{InvestmentDetails, PropertyDetails};

use crate::input;

/// Arguments for a multi-year investment projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimulateArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Expected monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Monthly landlord insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Monthly service charge
    #[arg(long, default_value = "0")]
    pub service_charge: Decimal,

    /// Monthly ground rent
    #[arg(long, default_value = "0")]
    pub ground_rent: Decimal,

    /// Annual property price appreciation (0.03 or 3%)
    #[arg(long, default_value = "0", value_parser = input::rate::parse_rate)]
    pub price_appreciation: Decimal,

    /// Annual rent appreciation (0.02 or 2%)
    #[arg(long, default_value = "0", value_parser = input::rate::parse_rate)]
    pub rent_appreciation: Decimal,

    /// Cash deposit
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual mortgage rate (0.045 or 4.5%)
    #[arg(long, value_parser = input::rate::parse_rate)]
    pub interest_rate: Option<Decimal>,

    /// Mortgage term in years
    #[arg(long, default_value = "25")]
    pub term_years: u32,

    /// Legal fees paid on completion
    #[arg(long, default_value = "0")]
    pub legal_fees: Decimal,

    /// Refurbishment budget
    #[arg(long, default_value = "0")]
    pub refurbishment: Decimal,

    /// Furnishing budget
    #[arg(long, default_value = "0")]
    pub furnishing: Decimal,

    /// Investor category (sole-trader, limited-company)
    #[arg(long, default_value = "sole-trader")]
    pub category: InvestorCategory,

    /// Number of years to project, year 0 included
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Letting agent's cut of rent (0.10 or 10%)
    #[arg(long, value_parser = input::rate::parse_rate)]
    pub management_cut: Option<Decimal>,

    /// Share of rent set aside for repairs (0.05 or 5%)
    #[arg(long, value_parser = input::rate::parse_rate)]
    pub repairs_cut: Option<Decimal>,

    /// Recompute gross/net yield each year from appreciated rent
    #[arg(long)]
    pub recompute_yields: bool,

    /// Path to JSON/YAML file with a custom stamp duty bracket table
    #[arg(long)]
    pub stamp_duty_table: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        from_flags(args)?
    };

    let result = engine::run_simulation(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}

fn from_flags(args: SimulateArgs) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    let defaults = RunningCostConfig::default();

    Ok(SimulationInput {
        property: PropertyDetails {
            purchase_price: args.price.ok_or("--price is required (or provide --input)")?,
            monthly_rent: args.rent.ok_or("--rent is required (or provide --input)")?,
            insurance: args.insurance,
            service_charge: args.service_charge,
            ground_rent: args.ground_rent,
            annual_price_appreciation: args.price_appreciation,
            annual_rent_appreciation: args.rent_appreciation,
        },
        investment: InvestmentDetails {
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            payment_term_years: args.term_years,
            legal_fees: args.legal_fees,
            refurbishment_cost: args.refurbishment,
            furnishing_cost: args.furnishing,
        },
        investor_category: args.category,
        number_of_years: args.years,
        running_costs: RunningCostConfig {
            property_management_cut: args
                .management_cut
                .unwrap_or(defaults.property_management_cut),
            repairs_and_maintenance_cut: args
                .repairs_cut
                .unwrap_or(defaults.repairs_and_maintenance_cut),
        },
        yield_mode: if args.recompute_yields {
            YieldMode::Recomputed
        } else {
            YieldMode::Frozen
        },
        stamp_duty_table: args
            .stamp_duty_table
            .as_deref()
            .map(input::file::read_input)
            .transpose()?,
    })
}
