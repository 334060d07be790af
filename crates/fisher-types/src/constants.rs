// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Fallback finite-difference step when no per-parameter override exists.
pub const DEFAULT_FD_STEP: f64 = 0.01;

/// Default target signal-to-noise ratio of the analysed galaxy.
pub const DEFAULT_SNR: f64 = 20.0;

/// Condition number above which the analysis logs a conditioning warning.
pub const DEFAULT_CONDITION_WARNING: f64 = 1e10;

/// Condition number above which covariance inversion is refused.
/// Roughly the reciprocal of f64 machine epsilon.
pub const DEFAULT_MAX_CONDITION_NUMBER: f64 = 1.0 / f64::EPSILON;

/// Pivot magnitude, relative to the largest matrix entry, at or below which
/// Gauss-Jordan elimination reports a singular matrix.
pub const PIVOT_TOLERANCE: f64 = 1e-18;

/// Relative asymmetry below which a matrix is treated as symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Jacobi sweeps stop once the summed off-diagonal magnitude drops below this
/// fraction of the Frobenius norm.
pub const JACOBI_TOLERANCE: f64 = 1e-14;

/// Maximum Jacobi sweeps.
pub const JACOBI_MAX_SWEEPS: usize = 100;
