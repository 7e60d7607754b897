//! CLI configuration.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use checkout_pricing::PricingPolicy;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["pricing.toml", ".pricing.toml", "pricing.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pricing policy.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> Result<CliConfig> {
        let env_config = self
            .environments
            .get(env)
            .ok_or_else(|| anyhow!("Unknown environment: {}", env))?;

        let mut config = self.clone();
        if let Some(ref pricing) = env_config.pricing {
            config.pricing = pricing.clone();
        }

        Ok(config)
    }

    /// Validate the base policy and every environment override.
    ///
    /// Returns one message per invalid policy.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = self.pricing.validate() {
            errors.push(format!("[pricing] {}", e));
        }

        let mut names: Vec<&String> = self.environments.keys().collect();
        names.sort();
        for name in names {
            if let Some(Err(e)) = self.environments[name].pricing.as_ref().map(|p| p.validate()) {
                errors.push(format!("[environments.{}.pricing] {}", name, e));
            }
        }

        errors
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Pricing policy override.
    #[serde(default)]
    pub pricing: Option<PricingPolicy>,
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default pricing.toml config file.
pub fn generate_default_config() -> String {
    r#"# Checkout pricing configuration

[pricing]
# Smallest amount the payment gateway accepts, in cents
min_gateway_amount_cents = 100
# PIX discount in basis points (500 = 5%)
pix_discount_bps = 500
# Card installments without interest
interest_free_installments = 3
# Interest compounded per installment above the free threshold
monthly_interest_rate = 0.0199
max_installments = 12
currency = "BRL"

# [environments.sandbox.pricing]
# min_gateway_amount_cents = 500
"#
    .to_string()
}
