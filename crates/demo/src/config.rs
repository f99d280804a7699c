//! Demo configuration, read from environment variables.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `ORDER_ENGINE_MODE` | `fluent`, `direct` | `fluent` |
//! | `ORDER_ENGINE_TAX` | `standard`, `alternate` | `alternate` (fluent), `standard` (direct) |
//! | `ORDER_ENGINE_VALIDATORS` | comma-separated built-in validator names | `positive_tax` |
//! | `ORDER_ENGINE_SEED` | `u64` | random |
//! | `ORDER_ENGINE_OUTPUT` | `yaml`, `json` | `yaml` |
//!
//! Validator names are not checked here; an unknown name fails when the
//! builder registers it. The direct mode only runs the structural check.

use orderengine_sales::TaxStrategyKind;
use thiserror::Error;

use crate::render::OutputFormat;

pub const MODE_VAR: &str = "ORDER_ENGINE_MODE";
pub const TAX_VAR: &str = "ORDER_ENGINE_TAX";
pub const VALIDATORS_VAR: &str = "ORDER_ENGINE_VALIDATORS";
pub const SEED_VAR: &str = "ORDER_ENGINE_SEED";
pub const OUTPUT_VAR: &str = "ORDER_ENGINE_OUTPUT";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Which construction path the demo exercises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DemoMode {
    /// Chained builder calls.
    #[default]
    Fluent,
    /// Explicit tax, check and processor calls on a hand-built order.
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub mode: DemoMode,
    /// Explicit strategy; `None` means the mode's default.
    pub tax: Option<TaxStrategyKind>,
    pub validators: Vec<String>,
    pub seed: Option<u64>,
    pub output: OutputFormat,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: DemoMode::Fluent,
            tax: None,
            validators: vec![orderengine_sales::validation::POSITIVE_TAX.to_string()],
            seed: None,
            output: OutputFormat::Yaml,
        }
    }
}

impl DemoConfig {
    /// The configured strategy, or the mode's default: alternate for the
    /// fluent chain, standard for the direct path.
    pub fn tax_strategy(&self) -> TaxStrategyKind {
        self.tax.unwrap_or(match self.mode {
            DemoMode::Fluent => TaxStrategyKind::Alternate,
            DemoMode::Direct => TaxStrategyKind::Standard,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any key/value source; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(MODE_VAR) {
            config.mode = match value.trim().to_ascii_lowercase().as_str() {
                "fluent" => DemoMode::Fluent,
                "direct" => DemoMode::Direct,
                _ => return Err(ConfigError::invalid(MODE_VAR, &value, "expected fluent or direct")),
            };
        }

        if let Some(value) = lookup(TAX_VAR) {
            let tax = value
                .parse::<TaxStrategyKind>()
                .map_err(|e| ConfigError::invalid(TAX_VAR, &value, e.to_string()))?;
            config.tax = Some(tax);
        }

        if let Some(value) = lookup(VALIDATORS_VAR) {
            config.validators = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(value) = lookup(SEED_VAR) {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(SEED_VAR, &value, e.to_string()))?;
            config.seed = Some(seed);
        }

        if let Some(value) = lookup(OUTPUT_VAR) {
            config.output = match value.trim().to_ascii_lowercase().as_str() {
                "yaml" | "yml" => OutputFormat::Yaml,
                "json" => OutputFormat::Json,
                _ => return Err(ConfigError::invalid(OUTPUT_VAR, &value, "expected yaml or json")),
            };
        }

        Ok(config)
    }
}
