// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FisherError {
    #[error("Parameter ordering is empty")]
    EmptyOrdering,

    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Missing step size for parameter {0}")]
    MissingStep(String),

    #[error("Step size for {param} must be finite and > 0, got {step}")]
    InvalidStep { param: String, step: f64 },

    #[error("Image shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Matrix must be {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Missing matrix entry: {0}")]
    MissingEntry(String),

    #[error("Fisher matrix is singular or ill-conditioned (condition number {condition_number:.3e})")]
    SingularMatrix { condition_number: f64 },

    #[error("Negative or zero variance for {param}: {value}")]
    NegativeVariance { param: String, value: f64 },

    #[error("Noise variance must be finite and > 0, got {0}")]
    InvalidNoiseVariance(f64),

    #[error("Renderer failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Linear algebra error: {0}")]
    LinAlg(String),
}

pub type FisherResult<T> = Result<T, FisherError>;
