//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use checkout_pricing::PricingCalculator;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with the environment override applied.
    pub config: CliConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Selected environment.
    pub env: Option<String>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or by searching upward.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve_path(&cwd, path)),
            None => find_config(&cwd),
        };

        let mut config = match config_path {
            Some(ref path) => {
                output.debug(&format!("Using config: {}", path.display()));
                CliConfig::load(path)?
            }
            None => {
                output.debug("No config file found, using default pricing policy");
                CliConfig::default()
            }
        };

        if let Some(env) = env {
            config = config.for_environment(env)?;
            output.debug(&format!("Applied environment: {}", env));
        }

        Ok(Self {
            config,
            config_path,
            env: env.map(String::from),
            output,
            cwd,
        })
    }

    /// Build a calculator from the configured policy.
    pub fn calculator(&self) -> Result<PricingCalculator> {
        let errors = self.config.validation_errors();
        if !errors.is_empty() {
            bail!("Invalid pricing configuration: {}", errors.join("; "));
        }
        Ok(PricingCalculator::new(self.config.pricing.clone()))
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a user-supplied path against the working directory.
pub fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_searches_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".pricing.toml"), "[pricing]\n").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".pricing.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pricing.json"), "{}").unwrap();
        std::fs::write(dir.path().join("pricing.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()).unwrap(), dir.path().join("pricing.toml"));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "pricing.toml"), PathBuf::from("/work/pricing.toml"));
        assert_eq!(resolve_path(cwd, "/etc/pricing.toml"), PathBuf::from("/etc/pricing.toml"));
    }
}
