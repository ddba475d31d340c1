//! Command-line entry point for the wood products carbon tracker.
//!
//! # Usage
//!
//! ```bash
//! wpct --data production.csv --parameters parameters.csv --output carbon_ledger.csv
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wpct::config::TrackerConfig;
use wpct::io::ProductionTable;
use wpct::logging::init_cli_logger;
use wpct::tracker::Tracker;
use wpct_core::integrate::IntegratorKind;
use wpct_core::parameters::ParameterTable;

/// Track carbon through harvested wood products
#[derive(Parser, Debug)]
#[command(name = "wpct")]
#[command(about = "Compute annual carbon pools and fluxes for harvested wood products")]
struct Args {
    /// Annual production table (CSV with a Year column and one column per product)
    #[arg(short, long)]
    data: PathBuf,

    /// Parameter table (CSV with Product, Variable and Parameter columns)
    #[arg(short, long)]
    parameters: PathBuf,

    /// Output path for the carbon ledger (CSV)
    #[arg(short, long)]
    output: PathBuf,

    /// Tracker configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Integrator used for disposal curves: adaptive or trapezoid
    #[arg(long)]
    integrator: Option<IntegratorKind>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => TrackerConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(integrator) = args.integrator {
        config = config.with_integrator(integrator);
    }

    let data = ProductionTable::from_path(&args.data)
        .with_context(|| format!("Failed to read production data {}", args.data.display()))?;
    let parameters = ParameterTable::from_path(&args.parameters)
        .with_context(|| format!("Failed to read parameters {}", args.parameters.display()))?;

    let ledger = Tracker::new(config)?.run(&data, &parameters)?;
    ledger
        .write_path(&args.output)
        .with_context(|| format!("Failed to write ledger {}", args.output.display()))?;

    info!(output = %args.output.display(), "saved results");
    Ok(())
}
