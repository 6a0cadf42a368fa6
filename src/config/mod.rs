//! Engine Configuration
//!
//! Numeric settings shared by every query an [`InferenceSystem`] answers.
//!
//! ## Overview
//!
//! Each system owns its own [`EngineConfig`]; there is no process-wide
//! tolerance. Two settings exist:
//!
//! - **zero_tolerance**: Sums of dom at or below this are treated as "nothing fired"
//! - **default_sample_count**: Sample count used by
//!   [`InferenceSystem::defuzzify_centroid_default`]
//!
//! ## Example
//!
//! ```
//! use fuzzy_rule_engine::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "default_sample_count": 250 }"#).unwrap();
//! assert_eq!(config.default_sample_count, 250);
//! assert_eq!(config.zero_tolerance, EngineConfig::DEFAULT_ZERO_TOLERANCE);
//! ```
//!
//! [`InferenceSystem`]: crate::system::InferenceSystem
//! [`InferenceSystem::defuzzify_centroid_default`]: crate::system::InferenceSystem::defuzzify_centroid_default

use serde::{Deserialize, Serialize};

use crate::{FuzzyError, Result};

/// Configuration for an inference system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Magnitude below which an accumulated dom counts as zero
    pub zero_tolerance: f32,

    /// Samples taken by centroid defuzzification when none are given
    pub default_sample_count: usize,
}

impl EngineConfig {
    /// Tolerance used when none is configured
    pub const DEFAULT_ZERO_TOLERANCE: f32 = 1e-6;

    /// Centroid sample count used when none is configured
    pub const DEFAULT_SAMPLE_COUNT: usize = 100;

    /// Builder: set zero tolerance
    pub fn with_zero_tolerance(mut self, tolerance: f32) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// Builder: set default centroid sample count
    pub fn with_default_sample_count(mut self, samples: usize) -> Self {
        self.default_sample_count = samples;
        self
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        if !self.zero_tolerance.is_finite() || self.zero_tolerance < 0.0 {
            return Err(FuzzyError::Config(format!(
                "zero_tolerance must be finite and non-negative, got {}",
                self.zero_tolerance
            )));
        }
        if self.default_sample_count == 0 {
            return Err(FuzzyError::Config(
                "default_sample_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FuzzyError::Serialization(format!("invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FuzzyError::Serialization(format!("engine config: {}", e)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: Self::DEFAULT_ZERO_TOLERANCE,
            default_sample_count: Self::DEFAULT_SAMPLE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_sample_count, 100);
        assert!((config.zero_tolerance - 1e-6).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let config = EngineConfig::default().with_zero_tolerance(-0.1);
        assert!(matches!(config.validate(), Err(FuzzyError::Config(_))));

        let config = EngineConfig::default().with_zero_tolerance(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_samples() {
        let config = EngineConfig::default().with_default_sample_count(0);
        assert!(matches!(config.validate(), Err(FuzzyError::Config(_))));
    }

    #[test]
    fn test_engine_config_serde() {
        let config = EngineConfig::default()
            .with_zero_tolerance(1e-4)
            .with_default_sample_count(64);
        let json = config.to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let parsed = EngineConfig::from_json("{}").unwrap();
        assert_eq!(parsed, EngineConfig::default());

        let err = EngineConfig::from_json(r#"{ "default_sample_count": 0 }"#);
        assert!(matches!(err, Err(FuzzyError::Config(_))));

        let err = EngineConfig::from_json("not json");
        assert!(matches!(err, Err(FuzzyError::Serialization(_))));
    }
}
