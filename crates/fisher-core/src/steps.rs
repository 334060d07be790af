// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Step Sizes
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Finite-difference step policies.

use crate::model::{ParameterSet, Renderer};
use fisher_types::config::StepConfig;
use fisher_types::error::{FisherError, FisherResult};
use fisher_types::named::ParamMap;
use fisher_types::params::ParamOrdering;
use std::collections::BTreeMap;

/// Supplies one finite-difference step per fitted parameter.
pub trait StepPolicy {
    fn steps<P, R>(&self, params: &P, renderer: &R) -> FisherResult<BTreeMap<String, f64>>
    where
        P: ParameterSet + ?Sized,
        R: Renderer + ?Sized;
}

/// Default step with per-parameter overrides.
#[derive(Debug, Clone)]
pub struct FixedSteps {
    pub default_step: f64,
    pub overrides: BTreeMap<String, f64>,
}

impl FixedSteps {
    pub fn uniform(step: f64) -> Self {
        Self {
            default_step: step,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, name: &str, step: f64) -> Self {
        self.overrides.insert(name.to_string(), step);
        self
    }
}

impl From<&StepConfig> for FixedSteps {
    fn from(cfg: &StepConfig) -> Self {
        Self {
            default_step: cfg.default_step,
            overrides: cfg.overrides.clone(),
        }
    }
}

impl StepPolicy for FixedSteps {
    fn steps<P, R>(&self, params: &P, _renderer: &R) -> FisherResult<BTreeMap<String, f64>>
    where
        P: ParameterSet + ?Sized,
        R: Renderer + ?Sized,
    {
        Ok(params
            .param_names()
            .iter()
            .map(|name| {
                let step = self.overrides.get(name).copied().unwrap_or(self.default_step);
                (name.to_string(), step)
            })
            .collect())
    }
}

/// Order `steps` by `ordering`; every step must exist and be finite and > 0.
pub fn validate_steps(
    ordering: &ParamOrdering,
    steps: &BTreeMap<String, f64>,
) -> FisherResult<ParamMap<f64>> {
    ParamMap::try_from_fn(ordering, |[i]| {
        let name = ordering.name(i);
        let step = *steps
            .get(name)
            .ok_or_else(|| FisherError::MissingStep(name.to_string()))?;
        check_step(name, step)?;
        Ok(step)
    })
}

pub(crate) fn check_step(name: &str, step: f64) -> FisherResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(FisherError::InvalidStep {
            param: name.to_string(),
            step,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fisher_types::params::{GroupedParameters, ParamVector};
    use fisher_types::state::Image;

    fn set() -> GroupedParameters {
        let ordering = ParamOrdering::new(["flux", "hlr", "e1"]).unwrap();
        let values: ParamVector = [("flux", 1.0), ("hlr", 0.5), ("e1", 0.0)]
            .into_iter()
            .collect();
        GroupedParameters::single(ordering, values).unwrap()
    }

    fn blank(_: &ParamVector) -> FisherResult<Image> {
        Ok(Image::zeros((1, 1)))
    }

    #[test]
    fn test_fixed_steps_apply_overrides() {
        let policy = FixedSteps::uniform(0.01).with_override("hlr", 0.002);
        let steps = policy.steps(&set(), &blank).unwrap();
        assert_eq!(steps.len(), 3);
        assert!((steps["flux"] - 0.01).abs() < 1e-15);
        assert!((steps["hlr"] - 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_validate_orders_by_ordering() {
        let policy = FixedSteps::uniform(0.01).with_override("e1", 0.03);
        let set = set();
        let steps = policy.steps(&set, &blank).unwrap();
        let ordered = validate_steps(set.param_names(), &steps).unwrap();
        assert!((ordered[2] - 0.03).abs() < 1e-15);
        assert!((ordered[0] - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_validate_rejects_missing_and_nonpositive() {
        let ordering = ParamOrdering::new(["flux", "hlr"]).unwrap();
        let mut steps = BTreeMap::from([("flux".to_string(), 0.01)]);
        assert!(matches!(
            validate_steps(&ordering, &steps),
            Err(FisherError::MissingStep(name)) if name == "hlr"
        ));
        steps.insert("hlr".to_string(), 0.0);
        assert!(matches!(
            validate_steps(&ordering, &steps),
            Err(FisherError::InvalidStep { ref param, .. }) if param == "hlr"
        ));
        steps.insert("hlr".to_string(), -0.1);
        assert!(validate_steps(&ordering, &steps).is_err());
        steps.insert("hlr".to_string(), f64::NAN);
        assert!(validate_steps(&ordering, &steps).is_err());
    }
}
