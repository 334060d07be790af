// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Linear Algebra
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear algebra utilities for small dense matrices.
//!
//! Jacobi eigendecomposition, singular values, condition number and
//! Gauss-Jordan inversion. Parameter counts are single digits to low tens,
//! so plain O(n³) loops are sufficient.

use fisher_types::constants::{
    JACOBI_MAX_SWEEPS, JACOBI_TOLERANCE, PIVOT_TOLERANCE, SYMMETRY_TOLERANCE,
};
use fisher_types::error::{FisherError, FisherResult};
use ndarray::{Array1, Array2};

fn square_dim(a: &Array2<f64>) -> FisherResult<usize> {
    let (rows, cols) = a.dim();
    if rows != cols || rows == 0 {
        return Err(FisherError::DimensionMismatch {
            expected: rows.max(cols),
            rows,
            cols,
        });
    }
    Ok(rows)
}

fn ensure_finite(a: &Array2<f64>, what: &str) -> FisherResult<()> {
    if a.iter().any(|v| !v.is_finite()) {
        return Err(FisherError::LinAlg(format!("{what} contains non-finite entries")));
    }
    Ok(())
}

/// Largest absolute entry.
pub fn max_abs(a: &Array2<f64>) -> f64 {
    a.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// True when `|a[i,j] - a[j,i]|` is negligible relative to the largest entry.
pub fn is_symmetric(a: &Array2<f64>) -> bool {
    let (rows, cols) = a.dim();
    if rows != cols {
        return false;
    }
    let tol = SYMMETRY_TOLERANCE * max_abs(a);
    for i in 0..rows {
        for j in (i + 1)..cols {
            if (a[[i, j]] - a[[j, i]]).abs() > tol {
                return false;
            }
        }
    }
    true
}

/// Replace each off-diagonal pair by its average.
pub fn symmetrize(a: &Array2<f64>) -> Array2<f64> {
    let mut out = a.clone();
    let n = out.nrows().min(out.ncols());
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = 0.5 * (out[[i, j]] + out[[j, i]]);
            out[[i, j]] = avg;
            out[[j, i]] = avg;
        }
    }
    out
}

/// Eigendecomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns (eigenvalues ascending, eigenvectors as columns).
/// Only the symmetric part of `a` is meaningful; the caller is expected to
/// pass a symmetric matrix.
pub fn symmetric_eigen(a: &Array2<f64>) -> FisherResult<(Array1<f64>, Array2<f64>)> {
    let n = square_dim(a)?;
    ensure_finite(a, "eigen input")?;

    let mut m = symmetrize(a);
    let mut v = Array2::eye(n);
    let scale = m.iter().map(|x| x * x).sum::<f64>().sqrt();

    if scale > 0.0 {
        for _ in 0..JACOBI_MAX_SWEEPS {
            let mut off_diag = 0.0;
            for i in 0..n {
                for j in (i + 1)..n {
                    off_diag += m[[i, j]].abs();
                }
            }
            if off_diag <= JACOBI_TOLERANCE * scale {
                break;
            }

            for i in 0..n {
                for j in (i + 1)..n {
                    let aij = m[[i, j]];
                    if aij == 0.0 {
                        continue;
                    }
                    let tau = (m[[j, j]] - m[[i, i]]) / (2.0 * aij);
                    let t = if tau >= 0.0 {
                        1.0 / (tau + (1.0 + tau * tau).sqrt())
                    } else {
                        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                    };
                    let cos = 1.0 / (1.0 + t * t).sqrt();
                    let sin = t * cos;

                    let aii = m[[i, i]];
                    let ajj = m[[j, j]];
                    m[[i, i]] = cos * cos * aii - 2.0 * sin * cos * aij + sin * sin * ajj;
                    m[[j, j]] = sin * sin * aii + 2.0 * sin * cos * aij + cos * cos * ajj;
                    m[[i, j]] = 0.0;
                    m[[j, i]] = 0.0;

                    for r in 0..n {
                        if r == i || r == j {
                            continue;
                        }
                        let ri = m[[r, i]];
                        let rj = m[[r, j]];
                        m[[r, i]] = cos * ri - sin * rj;
                        m[[i, r]] = m[[r, i]];
                        m[[r, j]] = sin * ri + cos * rj;
                        m[[j, r]] = m[[r, j]];
                    }

                    for r in 0..n {
                        let vi = v[[r, i]];
                        let vj = v[[r, j]];
                        v[[r, i]] = cos * vi - sin * vj;
                        v[[r, j]] = sin * vi + cos * vj;
                    }
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| m[[i, i]].total_cmp(&m[[j, j]]));

    let values = Array1::from_iter(order.iter().map(|&k| m[[k, k]]));
    let mut vectors = Array2::zeros((n, n));
    for (col, &k) in order.iter().enumerate() {
        for r in 0..n {
            vectors[[r, col]] = v[[r, k]];
        }
    }
    Ok((values, vectors))
}

/// Singular values, descending.
///
/// Symmetric input uses |eigenvalues| directly, which keeps full precision
/// for ill-conditioned Fisher matrices. Otherwise the square roots of the
/// eigenvalues of AᵀA are returned.
pub fn singular_values(a: &Array2<f64>) -> FisherResult<Array1<f64>> {
    square_dim(a)?;
    let mut sigma: Vec<f64> = if is_symmetric(a) {
        let (values, _) = symmetric_eigen(a)?;
        values.iter().map(|v| v.abs()).collect()
    } else {
        let ata = a.t().dot(a);
        let (values, _) = symmetric_eigen(&ata)?;
        values.iter().map(|v| v.max(0.0).sqrt()).collect()
    };
    sigma.sort_by(|x, y| y.total_cmp(x));
    Ok(Array1::from(sigma))
}

/// 2-norm condition number σ_max / σ_min.
///
/// Infinite when the smallest singular value is exactly zero.
pub fn condition_number(a: &Array2<f64>) -> FisherResult<f64> {
    let sigma = singular_values(a)?;
    let s_max = sigma[0];
    let s_min = sigma[sigma.len() - 1];
    if s_min == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(s_max / s_min)
}

/// Inverse by Gauss-Jordan elimination with partial pivoting.
///
/// Fails with `LinAlg` when a pivot is numerically zero relative to the
/// largest entry, or when the result is not finite.
pub fn invert(a: &Array2<f64>) -> FisherResult<Array2<f64>> {
    let n = square_dim(a)?;
    ensure_finite(a, "matrix to invert")?;
    let scale = max_abs(a);
    if scale == 0.0 {
        return Err(FisherError::LinAlg("cannot invert the zero matrix".to_string()));
    }

    let mut m = a.clone();
    let mut inv = Array2::eye(n);

    for col in 0..n {
        let mut pivot_row = col;
        for r in (col + 1)..n {
            if m[[r, col]].abs() > m[[pivot_row, col]].abs() {
                pivot_row = r;
            }
        }
        let pivot = m[[pivot_row, col]];
        if pivot.abs() <= PIVOT_TOLERANCE * scale {
            return Err(FisherError::LinAlg(format!(
                "numerically zero pivot {pivot:.3e} in column {col}"
            )));
        }
        if pivot_row != col {
            for k in 0..n {
                m.swap([col, k], [pivot_row, k]);
                inv.swap([col, k], [pivot_row, k]);
            }
        }

        let inv_pivot = 1.0 / pivot;
        for k in 0..n {
            m[[col, k]] *= inv_pivot;
            inv[[col, k]] *= inv_pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = m[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                m[[r, k]] -= factor * m[[col, k]];
                inv[[r, k]] -= factor * inv[[col, k]];
            }
        }
    }

    ensure_finite(&inv, "inverse")?;
    Ok(inv)
}
