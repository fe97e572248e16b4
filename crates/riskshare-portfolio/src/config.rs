//! Engine configuration.
//!
//! Aggregates the settings of every pipeline stage. Any section missing from
//! a TOML file takes its defaults:
//!
//! ```toml
//! return_kind = "simple"
//!
//! [compute]
//! parallel = true
//! parallel_threshold = 256
//!
//! [lookback]
//! short_days = 252
//! medium_days = 756
//! long_days = 1260
//! default_horizon = "short"
//! minimum_sample = 20
//!
//! [decomposition]
//! degenerate_tolerance = 1e-12
//! weight_scale = "auto"
//! ```

use std::path::Path;

use riskshare_core::{ComputeConfig, RiskShareError, RiskShareResult};
use riskshare_math::ReturnKind;
use serde::{Deserialize, Serialize};

use crate::decomposition::DecompositionConfig;
use crate::lookback::LookbackPolicy;

/// Configuration for [`attribute_risk`](crate::pipeline::attribute_risk).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Return definition applied to every price series.
    pub return_kind: ReturnKind,

    /// Parallel scheduling of the covariance estimate.
    pub compute: ComputeConfig,

    /// Horizon windows and minimum sample.
    pub lookback: LookbackPolicy,

    /// Degenerate tolerance and weight scale.
    pub decomposition: DecompositionConfig,
}

impl EngineConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the return definition.
    #[must_use]
    pub fn with_return_kind(mut self, kind: ReturnKind) -> Self {
        self.return_kind = kind;
        self
    }

    /// Sets the compute settings.
    #[must_use]
    pub fn with_compute(mut self, compute: ComputeConfig) -> Self {
        self.compute = compute;
        self
    }

    /// Sets the lookback policy.
    #[must_use]
    pub fn with_lookback(mut self, lookback: LookbackPolicy) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the decomposition settings.
    #[must_use]
    pub fn with_decomposition(mut self, decomposition: DecompositionConfig) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document does not parse or a section
    /// fails validation.
    pub fn from_toml_str(content: &str) -> RiskShareResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| RiskShareError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> RiskShareResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RiskShareError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loading engine configuration");
        Self::from_toml_str(&content)
    }

    /// Renders the config as a TOML document.
    pub fn to_toml_string(&self) -> RiskShareResult<String> {
        toml::to_string_pretty(self).map_err(|e| RiskShareError::invalid_config(e.to_string()))
    }

    /// Validates every section.
    pub fn validate(&self) -> RiskShareResult<()> {
        self.lookback.validate()?;
        self.decomposition.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskshare_core::types::WeightScale;

    use crate::lookback::Horizon;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            return_kind = "log"

            [lookback]
            minimum_sample = 60
            default_horizon = "medium"

            [decomposition]
            weight_scale = "percent"
            "#,
        )
        .unwrap();

        assert_eq!(config.return_kind, ReturnKind::Log);
        assert_eq!(config.lookback.minimum_sample, 60);
        assert_eq!(config.lookback.short_days, 252);
        assert_eq!(config.lookback.default_horizon, Horizon::Medium);
        assert_eq!(config.decomposition.weight_scale, WeightScale::Percent);
        assert_eq!(config.decomposition.degenerate_tolerance, 1e-12);
        assert!(config.compute.parallel);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("[lookback]\nminimum_sample = 1\n").unwrap_err();
        assert!(matches!(err, RiskShareError::InvalidConfig { .. }));

        let err = EngineConfig::from_toml_str("return_kind = \"weird\"").unwrap_err();
        assert!(matches!(err, RiskShareError::InvalidConfig { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::new()
            .with_return_kind(ReturnKind::Log)
            .with_compute(ComputeConfig::sequential());
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/riskshare.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
