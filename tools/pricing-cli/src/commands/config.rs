//! Configuration management commands.
//!
//! `init` and `validate` take the raw `--config`/`--env` values instead of a
//! loaded context, so they still work when the config file is missing or
//! does not parse.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use checkout_pricing::{Currency, PricingPolicy};
use console::Term;
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, is_json, CliConfig, CONFIG_FILE_NAMES};
use crate::context::{find_config, resolve_path, Context};
use crate::output::{format_rate, Output};

/// Run the config command.
pub fn run(args: ConfigArgs, config_path: Option<&str>, env: Option<&str>, output: &Output) -> Result<()> {
    let load = || Context::load(config_path, env, output.clone());

    match args.command {
        ConfigCommand::Show => show_config(&load()?),
        ConfigCommand::Get { key } => get_config(&key, &load()?),
        ConfigCommand::Set { key, value } => set_config(&key, &value, &load()?),
        ConfigCommand::Init { force } => init_config(force, config_path, output),
        ConfigCommand::Validate => validate_config(config_path, env, output),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    if let Some(ref env) = ctx.env {
        ctx.output.kv("environment", env);
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("min_gateway_amount_cents", &pricing.min_gateway_amount_cents.to_string());
    ctx.output.kv("pix_discount_bps", &pricing.pix_discount_bps.to_string());
    ctx.output.kv(
        "interest_free_installments",
        &pricing.interest_free_installments.to_string(),
    );
    ctx.output.kv(
        "monthly_interest_rate",
        &format!("{} ({})", pricing.monthly_interest_rate, format_rate(pricing.monthly_interest_rate)),
    );
    ctx.output.kv("max_installments", &pricing.max_installments.to_string());
    ctx.output.kv("currency", pricing.currency.code());

    if !ctx.config.environments.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for env in names {
            ctx.output.kv("-", env);
        }
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.clone().or_else(|| find_config(&ctx.cwd)) else {
        bail!("No config file found. Run `pricing config init` to create one.");
    };

    // Reload from disk so environment overrides are not written back
    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;

    if let Err(e) = config.pricing.validate() {
        bail!("Refusing to save: {}", e);
    }

    config.save(&config_path)?;
    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, config_path: Option<&str>, output: &Output) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = match config_path {
        Some(path) => resolve_path(&cwd, path),
        None => cwd.join(CONFIG_FILE_NAMES[0]),
    };

    if path.exists() && !force && !confirm_overwrite(&path, output)? {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    if is_json(&path) {
        CliConfig::default().save(&path)?;
    } else {
        fs::write(&path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    }

    output.success(&format!("Created: {}", path.display()));

    Ok(())
}

/// Ask before overwriting; only when a person is at the terminal.
fn confirm_overwrite(path: &Path, output: &Output) -> Result<bool> {
    if output.is_json() || !Term::stderr().is_term() {
        return Ok(false);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;

    Ok(confirmed)
}

fn validate_config(config_path: Option<&str>, env: Option<&str>, output: &Output) -> Result<()> {
    output.header("Validating configuration");

    let ctx = match Context::load(config_path, env, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("Error: {:#}", e));
            bail!("Configuration has 1 error(s)");
        }
    };

    let errors = ctx.config.validation_errors();
    let warnings = policy_warnings(&ctx.config.pricing);

    for error in &errors {
        output.error(&format!("Error: {}", error));
    }
    for warning in &warnings {
        output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    if warnings.is_empty() {
        output.success("Configuration is valid");
    } else {
        output.success("Configuration is valid (with warnings)");
    }

    Ok(())
}

/// Values that are legal but probably mistakes.
fn policy_warnings(policy: &PricingPolicy) -> Vec<String> {
    let mut warnings = Vec::new();

    if policy.min_gateway_amount_cents == 0 {
        warnings.push("pricing.min_gateway_amount_cents is 0; gateways reject empty charges".to_string());
    }
    if policy.monthly_interest_rate > 0.1 {
        warnings.push(format!(
            "pricing.monthly_interest_rate {} is above 10% per month",
            format_rate(policy.monthly_interest_rate)
        ));
    }
    if policy.pix_discount_bps > 5_000 {
        warnings.push(format!(
            "pricing.pix_discount_bps {} discounts more than half the price",
            policy.pix_discount_bps
        ));
    }

    warnings
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let pricing = &config.pricing;

    match parts.as_slice() {
        ["pricing", "min_gateway_amount_cents"] => Ok(pricing.min_gateway_amount_cents.to_string()),
        ["pricing", "pix_discount_bps"] => Ok(pricing.pix_discount_bps.to_string()),
        ["pricing", "interest_free_installments"] => Ok(pricing.interest_free_installments.to_string()),
        ["pricing", "monthly_interest_rate"] => Ok(pricing.monthly_interest_rate.to_string()),
        ["pricing", "max_installments"] => Ok(pricing.max_installments.to_string()),
        ["pricing", "currency"] => Ok(format!("\"{}\"", pricing.currency.code())),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let pricing = &mut config.pricing;

    match parts.as_slice() {
        ["pricing", "min_gateway_amount_cents"] => pricing.min_gateway_amount_cents = value.parse()?,
        ["pricing", "pix_discount_bps"] => pricing.pix_discount_bps = value.parse()?,
        ["pricing", "interest_free_installments"] => pricing.interest_free_installments = value.parse()?,
        ["pricing", "monthly_interest_rate"] => pricing.monthly_interest_rate = value.parse()?,
        ["pricing", "max_installments"] => pricing.max_installments = value.parse()?,
        ["pricing", "currency"] => {
            pricing.currency = match Currency::from_code(value) {
                Some(currency) => currency,
                None => bail!("Unknown currency: {}", value),
            }
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
