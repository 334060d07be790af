// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Nonlinearity Bias
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! First-order maximum-likelihood bias from model nonlinearity.
//!
//!   B_ijk     = Σ_pixels (∂I/∂θ_i)(∂²I/∂θ_j∂θ_k) / σ²
//!   b_i(pix)  = -½ Σ_j Σ_k Σ_l C_ij C_kl B_jkl(pix)
//!   bias_i    = Σ_pixels b_i(pix)
//!
//! `i` is the target parameter; `j`, `k`, `l` are contracted. B is
//! symmetric in (j, k) but not in i, so the index roles are fixed.

use crate::derivatives::ensure_common_shape;
use crate::noise::ensure_noise_variance;
use crate::par::collect_indexed;
use fisher_types::error::{FisherError, FisherResult};
use fisher_types::named::{Named, PairMap, ParamMap, TripleMap};
use fisher_types::state::Image;

fn ensure_same_ordering<A, B, const N: usize, const M: usize>(
    a: &Named<A, N>,
    b: &Named<B, M>,
) -> FisherResult<()> {
    if a.ordering() != b.ordering() {
        return Err(FisherError::ConfigError(
            "matrices are indexed by different parameter orderings".to_string(),
        ));
    }
    Ok(())
}

/// `first[i] * second[j,k] / var_noise` for every ordered triple.
pub fn bias_matrix_images(
    first: &ParamMap<Image>,
    second: &PairMap<Image>,
    var_noise: f64,
) -> FisherResult<TripleMap<Image>> {
    let var_noise = ensure_noise_variance(var_noise)?;
    ensure_same_ordering(first, second)?;
    ensure_common_shape(first.as_slice().iter().chain(second.as_slice()))?;
    Ok(TripleMap::from_fn(first.ordering(), |[i, j, k]| {
        &first[i] * &second[[j, k]] / var_noise
    }))
}

/// Pixel sums of the bias-matrix images.
pub fn bias_matrix(images: &TripleMap<Image>) -> TripleMap<f64> {
    images.map(|img| img.sum())
}

/// Per-pixel bias image of each target parameter.
pub fn bias_images(
    covariance: &PairMap<f64>,
    bias_matrix_images: &TripleMap<Image>,
    parallel: bool,
) -> FisherResult<ParamMap<Image>> {
    ensure_same_ordering(covariance, bias_matrix_images)?;
    let shape = ensure_common_shape(bias_matrix_images.as_slice())?.unwrap_or((0, 0));
    let ordering = covariance.ordering();
    let p = ordering.len();

    let images = collect_indexed(p, parallel, |i| {
        let mut summation = Image::zeros(shape);
        for j in 0..p {
            for k in 0..p {
                for l in 0..p {
                    let weight = covariance[[i, j]] * covariance[[k, l]];
                    summation.scaled_add(weight, &bias_matrix_images[[j, k, l]]);
                }
            }
        }
        Ok(summation * -0.5)
    })?;
    log::debug!("bias images: {p} targets, {} terms each", p * p * p);
    ParamMap::from_vec(ordering, images)
}

/// Pixel sums of the bias images.
pub fn biases(bias_images: &ParamMap<Image>) -> ParamMap<f64> {
    bias_images.map(|img| img.sum())
}
