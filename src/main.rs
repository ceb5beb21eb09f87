//! Command-line interface for soa-sim
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate a model with default ratios
//! soa-sim --datatypes 4 --classes 20 --services 10 --properties 6
//!
//! # Only simple classes and services, fixed seed
//! soa-sim -d 0 -c 5 -s 3 -p 2 --refclassratio 0 --refserviceratio 0 --seed 42
//!
//! # Load counts and ratios from YAML, emit JSON
//! soa-sim --config model.yaml --format json
//! ```
//!
//! Logs go to stderr (filtered by `RUST_LOG`); the model goes to stdout.

use anyhow::Context;
use clap::Parser;
use soa_generator::SoaGenerator;
use soa_sim::{render, GenerateArgs, OutputFormat};

#[derive(Parser)]
#[command(name = "soa-sim")]
#[command(about = "Generates a simulation for service oriented architecture")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Number of simulated invocations per service (0 disables simulation)
    #[arg(long, default_value_t = 0)]
    simulate_calls: u64,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.generate.to_config()?;

    tracing::info!(
        "Generating {} classes ({} referential) and {} services ({} referential)",
        config.class_count,
        config.get_ref_class_count(),
        config.service_count,
        config.get_ref_service_count()
    );
    match config.seed {
        Some(seed) => tracing::info!("Using seed {}", seed),
        None => tracing::info!("No seed given - output is not reproducible"),
    }

    let mut generator = SoaGenerator::new(config);
    let model = generator
        .generate()
        .context("Failed to generate architecture model")?;

    let invocations = if cli.simulate_calls > 0 {
        tracing::info!(
            "Simulating {} calls per service",
            cli.simulate_calls
        );
        generator.simulate(&model, cli.simulate_calls)
    } else {
        Vec::new()
    };

    let output = render(&model, &invocations, cli.format)?;
    println!("{output}");

    tracing::info!("Generation completed successfully");
    Ok(())
}
