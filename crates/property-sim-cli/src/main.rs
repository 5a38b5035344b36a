mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::MortgageArgs;
use commands::simulate::SimulateArgs;
use commands::stamp_duty::StampDutyArgs;

/// Buy-to-let property investment simulation
#[derive(Parser)]
#[command(
    name = "propsim",
    version,
    about = "Buy-to-let property investment simulation",
    long_about = "A CLI for projecting buy-to-let property investments with decimal \
                  precision. Computes stamp duty, mortgage amortization schedules and \
                  year-by-year yield, ROI and equity projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine activity to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate stamp duty on a purchase
    StampDuty(StampDutyArgs),
    /// Monthly payment and yearly amortization schedule for a repayment mortgage
    Mortgage(MortgageArgs),
    /// Project yield, ROI and equity year by year
    Simulate(SimulateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::StampDuty(args) => commands::stamp_duty::run_stamp_duty(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Version => {
            println!("propsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
