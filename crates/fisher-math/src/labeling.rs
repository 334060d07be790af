// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Labeling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Conversion between name-keyed matrices and dense arrays.
//!
//! Row `i` / column `j` of the dense form is parameter `ordering.name(i)` /
//! `ordering.name(j)`. These functions are the only bridge between the
//! two representations.

use fisher_types::error::{FisherError, FisherResult};
use fisher_types::named::{PairMap, ParamMap};
use fisher_types::params::ParamOrdering;
use ndarray::{Array1, Array2};

pub fn to_dense(matrix: &PairMap<f64>) -> Array2<f64> {
    let p = matrix.dim();
    Array2::from_shape_fn((p, p), |(i, j)| matrix[[i, j]])
}

pub fn to_named(ordering: &ParamOrdering, dense: &Array2<f64>) -> FisherResult<PairMap<f64>> {
    let p = ordering.len();
    let (rows, cols) = dense.dim();
    if rows != p || cols != p {
        return Err(FisherError::DimensionMismatch {
            expected: p,
            rows,
            cols,
        });
    }
    Ok(PairMap::from_fn(ordering, |[i, j]| dense[[i, j]]))
}

pub fn vector_to_dense(vector: &ParamMap<f64>) -> Array1<f64> {
    Array1::from_iter(vector.as_slice().iter().copied())
}

pub fn vector_to_named(
    ordering: &ParamOrdering,
    dense: &Array1<f64>,
) -> FisherResult<ParamMap<f64>> {
    let p = ordering.len();
    if dense.len() != p {
        return Err(FisherError::DimensionMismatch {
            expected: p,
            rows: dense.len(),
            cols: 1,
        });
    }
    Ok(ParamMap::from_fn(ordering, |[i]| dense[i]))
}
