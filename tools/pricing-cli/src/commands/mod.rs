//! CLI command implementations.

pub mod config;
pub mod plan;
pub mod quote;

use anyhow::{Context as _, Result};
use checkout_pricing::{Currency, Money, PaymentMethod};
use clap::{Args, Subcommand};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Base amount, e.g. `100`, `99.90` or `1.234,56`.
    pub amount: String,

    /// Payment method (pix or card).
    #[arg(short, long, default_value = "pix")]
    pub method: PaymentMethod,

    /// Number of card installments.
    #[arg(short, long)]
    pub installments: Option<u32>,

    /// Treat the amount as integer cents.
    #[arg(long)]
    pub cents: bool,
}

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Base amount, e.g. `100`, `99.90` or `1.234,56`.
    pub amount: String,

    /// Treat the amount as integer cents.
    #[arg(long)]
    pub cents: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Parse a command-line amount into cents.
pub fn parse_amount(input: &str, cents: bool, currency: Currency) -> Result<i64> {
    if cents {
        let value: i64 = input
            .trim()
            .parse()
            .with_context(|| format!("Invalid amount in cents: {}", input))?;
        return Ok(value);
    }

    let money = Money::parse(input, currency)?;
    Ok(money.amount_cents)
}
