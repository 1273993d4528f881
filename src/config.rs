//! Aggregator configuration: defaults in code, optional TOML file,
//! environment overrides for the credential. Validation is loud; a bad
//! value is an `InvalidConfiguration` error, never silently corrected.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::sources::finance_api::FinanceApiConfig;
use crate::sources::web_search::WebSearchConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/aggregator.toml";
pub const ENV_CONFIG_PATH: &str = "AGGREGATOR_CONFIG_PATH";
pub const ENV_FINANCE_API_TOKEN: &str = "FINANCE_API_TOKEN";

pub const DEFAULT_MAX_RESULTS: usize = 20;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Hard cap on the returned record count, applied after dedup.
    pub max_results: usize,
    /// Near-duplicate threshold shared by everything that compares
    /// content, in [0, 1].
    pub similarity_threshold: f64,
    /// Optional wall-clock bound for one aggregation call. `None`
    /// preserves the default of no global deadline; each adapter still
    /// owns its own timeout.
    pub deadline_secs: Option<u64>,
    pub finance_api: FinanceApiConfig,
    pub web_search: WebSearchConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            similarity_threshold: crate::similarity::DEFAULT_SIMILARITY_THRESHOLD,
            deadline_secs: None,
            finance_api: FinanceApiConfig::default(),
            web_search: WebSearchConfig::default(),
        }
    }
}

impl AggregatorConfig {
    /// Fail fast on values outside their domain.
    pub fn validate(&self) -> std::result::Result<(), PipelineError> {
        if self.max_results == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "max_results must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PipelineError::InvalidConfiguration(format!(
                "similarity threshold {} outside [0, 1]",
                self.similarity_threshold
            )));
        }
        if self.deadline_secs == Some(0) {
            return Err(PipelineError::InvalidConfiguration(
                "deadline_secs must be greater than zero when set".into(),
            ));
        }
        if self.finance_api.timeout_secs == 0 || self.web_search.timeout_secs == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "adapter timeout_secs must be greater than zero".into(),
            ));
        }
        if self.finance_api.max_items == 0 || self.web_search.max_items == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "adapter max_items must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Apply environment overrides. The credential from
    /// `FINANCE_API_TOKEN` wins over any file-provided value.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ENV_FINANCE_API_TOKEN) {
            if !token.trim().is_empty() {
                self.finance_api.token = Some(token);
            }
        }
    }
}

/// Load configuration from an explicit TOML path.
pub fn load_from(path: &Path) -> Result<AggregatorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading aggregator config from {}", path.display()))?;
    let mut config: AggregatorConfig = toml::from_str(&content)
        .with_context(|| format!("parsing aggregator config from {}", path.display()))?;
    config.apply_env();
    Ok(config)
}

/// Load configuration using env var + fallbacks:
/// 1) `$AGGREGATOR_CONFIG_PATH` (must exist when set)
/// 2) `config/aggregator.toml` when present
/// 3) built-in defaults
pub fn load_default() -> Result<AggregatorConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        }
        return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
    }
    let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_p.exists() {
        return load_from(&default_p);
    }
    let mut config = AggregatorConfig::default();
    config.apply_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AggregatorConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_cap_and_bad_threshold() {
        let mut config = AggregatorConfig::default();
        config.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = AggregatorConfig::default();
        config.similarity_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = AggregatorConfig::default();
        config.deadline_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_layers_over_defaults() {
        let toml = r#"
            max_results = 5

            [web_search]
            max_items = 7
        "#;
        let config: AggregatorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.web_search.max_items, 7);
        // Untouched sections keep their defaults.
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.finance_api.max_items, 20);
    }
}
