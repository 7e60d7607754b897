//! Pricing CLI - preview checkout charges and manage the pricing policy.
//!
//! Commands:
//! - `pricing quote` - Price a PIX or card checkout
//! - `pricing plan` - List every card installment option
//! - `pricing config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, PlanArgs, QuoteArgs};

/// Pricing CLI - Preview checkout charges for PIX and credit card
#[derive(Parser)]
#[command(name = "pricing")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Environment override to apply from the config file
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single checkout
    Quote(QuoteArgs),

    /// Show all installment options for an amount
    Plan(PlanArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Config commands load the file themselves so `init` and `validate`
    // still run when it is missing or broken
    let load = || context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone());

    // Execute command
    let result = match cli.command {
        Commands::Quote(args) => load().and_then(|ctx| commands::quote::run(args, &ctx)),
        Commands::Plan(args) => load().and_then(|ctx| commands::plan::run(args, &ctx)),
        Commands::Config(args) => {
            commands::config::run(args, cli.config.as_deref(), cli.env.as_deref(), &output)
        }
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
