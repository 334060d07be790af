// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_CONDITION_WARNING, DEFAULT_FD_STEP, DEFAULT_MAX_CONDITION_NUMBER, DEFAULT_SNR,
};
use crate::error::{FisherError, FisherResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings of one Fisher analysis.
/// Every field is optional in JSON and falls back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target signal-to-noise ratio used to derive the noise variance.
    #[serde(default = "default_snr")]
    pub snr: f64,
    /// Fixed noise variance. When present the SNR is not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_noise: Option<f64>,
    /// Seed handed to the noise model.
    #[serde(default)]
    pub noise_seed: u64,
    #[serde(default)]
    pub steps: StepConfig,
    /// Condition number above which a warning is logged.
    #[serde(default = "default_condition_warning")]
    pub condition_warning: f64,
    /// Condition number above which covariance inversion fails.
    #[serde(default = "default_max_condition_number")]
    pub max_condition_number: f64,
    /// Evaluate derivative renders and bias contractions on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

/// Finite-difference step sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default = "default_step")]
    pub default_step: f64,
    /// Per-parameter steps, keyed by parameter name.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

fn default_snr() -> f64 {
    DEFAULT_SNR
}
fn default_step() -> f64 {
    DEFAULT_FD_STEP
}
fn default_condition_warning() -> f64 {
    DEFAULT_CONDITION_WARNING
}
fn default_max_condition_number() -> f64 {
    DEFAULT_MAX_CONDITION_NUMBER
}

impl Default for StepConfig {
    fn default() -> Self {
        StepConfig {
            default_step: default_step(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            snr: default_snr(),
            var_noise: None,
            noise_seed: 0,
            steps: StepConfig::default(),
            condition_warning: default_condition_warning(),
            max_condition_number: default_max_condition_number(),
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> FisherResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> FisherResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FisherResult<()> {
        if !self.snr.is_finite() || self.snr <= 0.0 {
            return Err(FisherError::ConfigError(format!(
                "snr must be finite and > 0, got {}",
                self.snr
            )));
        }
        if let Some(var) = self.var_noise {
            if !var.is_finite() || var <= 0.0 {
                return Err(FisherError::InvalidNoiseVariance(var));
            }
        }
        check_step("default_step", self.steps.default_step)?;
        for (name, &step) in &self.steps.overrides {
            check_step(name, step)?;
        }
        for (label, value) in [
            ("condition_warning", self.condition_warning),
            ("max_condition_number", self.max_condition_number),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(FisherError::ConfigError(format!(
                    "{label} must be > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn check_step(param: &str, step: f64) -> FisherResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(FisherError::InvalidStep {
            param: param.to_string(),
            step,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let cfg = AnalysisConfig::from_json("{}").unwrap();
        assert!((cfg.snr - DEFAULT_SNR).abs() < 1e-12);
        assert!(cfg.var_noise.is_none());
        assert!((cfg.steps.default_step - DEFAULT_FD_STEP).abs() < 1e-15);
        assert!(cfg.steps.overrides.is_empty());
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_overrides_and_variance() {
        let cfg = AnalysisConfig::from_json(
            r#"{
                "snr": 60.0,
                "var_noise": 2.5,
                "noise_seed": 7,
                "steps": { "default_step": 0.005, "overrides": { "hlr": 0.001 } },
                "parallel": true
            }"#,
        )
        .unwrap();
        assert!((cfg.snr - 60.0).abs() < 1e-12);
        assert_eq!(cfg.var_noise, Some(2.5));
        assert_eq!(cfg.noise_seed, 7);
        assert!((cfg.steps.overrides["hlr"] - 0.001).abs() < 1e-15);
        assert!(cfg.parallel);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AnalysisConfig::from_json(r#"{"snr": 0.0}"#).is_err());
        assert!(matches!(
            AnalysisConfig::from_json(r#"{"var_noise": -1.0}"#),
            Err(FisherError::InvalidNoiseVariance(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_json(r#"{"steps": {"overrides": {"flux": 0.0}}}"#),
            Err(FisherError::InvalidStep { ref param, .. }) if param == "flux"
        ));
        assert!(AnalysisConfig::from_json(r#"{"max_condition_number": -3.0}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AnalysisConfig::from_file("/nonexistent/fisher_config.json").unwrap_err();
        assert!(matches!(err, FisherError::Io(_)));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut cfg = AnalysisConfig::default();
        cfg.steps.overrides.insert("e1".to_string(), 0.02);
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2 = AnalysisConfig::from_json(&json).unwrap();
        assert_eq!(cfg2.steps.overrides, cfg.steps.overrides);
        assert!((cfg2.max_condition_number - cfg.max_condition_number).abs() < 1.0);
    }
}
