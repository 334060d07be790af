// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Fisher Matrix
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fisher information assembled from first-derivative images.
//!
//! F_ij = Σ_pixels (∂I/∂θ_i)(∂I/∂θ_j) / σ²

use crate::noise::ensure_noise_variance;
use fisher_types::error::FisherResult;
use fisher_types::named::{PairMap, ParamMap};
use fisher_types::state::Image;

/// Per-pixel Fisher contributions `first[i] * first[j] / var_noise`.
pub fn fisher_matrix_images(
    first: &ParamMap<Image>,
    var_noise: f64,
) -> FisherResult<PairMap<Image>> {
    let var_noise = ensure_noise_variance(var_noise)?;
    crate::derivatives::ensure_common_shape(first.as_slice())?;
    Ok(PairMap::from_fn(first.ordering(), |[i, j]| {
        &first[i] * &first[j] / var_noise
    }))
}

/// Pixel sums of the Fisher images.
pub fn fisher_matrix(images: &PairMap<Image>) -> PairMap<f64> {
    images.map(|img| img.sum())
}
