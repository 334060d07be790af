// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Covariance
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Covariance and correlation from the Fisher matrix.

use fisher_math::labeling::{to_dense, to_named};
use fisher_math::linalg::{condition_number, invert, symmetrize};
use fisher_types::error::{FisherError, FisherResult};
use fisher_types::named::PairMap;

/// σ_max / σ_min of the Fisher matrix; infinite for an exactly singular one.
pub fn fisher_condition_number(fisher: &PairMap<f64>) -> FisherResult<f64> {
    condition_number(&to_dense(fisher))
}

/// Inverse of the Fisher matrix.
///
/// Fails with `SingularMatrix` when the condition number is not finite or
/// exceeds `max_condition_number`, or when elimination meets a zero pivot.
pub fn covariance_matrix(
    fisher: &PairMap<f64>,
    max_condition_number: f64,
) -> FisherResult<PairMap<f64>> {
    let dense = to_dense(fisher);
    let cond = condition_number(&dense)?;
    if !cond.is_finite() || cond > max_condition_number {
        return Err(FisherError::SingularMatrix {
            condition_number: cond,
        });
    }
    let inverse = invert(&dense).map_err(|err| match err {
        FisherError::LinAlg(msg) => {
            log::warn!("Fisher inversion failed: {msg}");
            FisherError::SingularMatrix {
                condition_number: cond,
            }
        }
        other => other,
    })?;
    to_named(fisher.ordering(), &symmetrize(&inverse))
}

/// `cov[i,j] / sqrt(cov[i,i] cov[j,j])`.
///
/// A diagonal entry that is not strictly positive fails with
/// `NegativeVariance` instead of reaching the square root.
pub fn correlation_matrix(covariance: &PairMap<f64>) -> FisherResult<PairMap<f64>> {
    let ordering = covariance.ordering();
    let mut sigma = Vec::with_capacity(ordering.len());
    for (i, name) in ordering.iter().enumerate() {
        let var = covariance[[i, i]];
        if !var.is_finite() || var <= 0.0 {
            return Err(FisherError::NegativeVariance {
                param: name.to_string(),
                value: var,
            });
        }
        sigma.push(var.sqrt());
    }
    Ok(PairMap::from_fn(ordering, |[i, j]| {
        covariance[[i, j]] / (sigma[i] * sigma[j])
    }))
}
