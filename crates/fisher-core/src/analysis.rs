// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Fisher Analysis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full Fisher analysis of one galaxy configuration.
//!
//! Pipeline: base image + noise variance → derivative images → Fisher
//! matrix → covariance / correlation → bias. Everything is computed once in
//! [`FisherAnalysis::new`] and exposed read-only afterwards.

use crate::bias::{bias_images, bias_matrix, bias_matrix_images, biases};
use crate::covariance::{correlation_matrix, covariance_matrix, fisher_condition_number};
use crate::derivatives::{first_derivative_images, second_derivative_images};
use crate::fisher::{fisher_matrix, fisher_matrix_images};
use crate::model::{ParameterSet, Renderer};
use crate::noise::{ensure_noise_variance, GaussianNoise, NoiseModel};
use crate::steps::{validate_steps, FixedSteps, StepPolicy};
use fisher_math::labeling::{to_dense, to_named};
use fisher_types::config::AnalysisConfig;
use fisher_types::error::{FisherError, FisherResult};
use fisher_types::named::{PairMap, ParamMap, TripleMap};
use fisher_types::params::ParamOrdering;
use fisher_types::state::Image;
use ndarray::Array2;

/// Immutable result of a Fisher analysis.
#[derive(Debug, Clone)]
pub struct FisherAnalysis {
    param_names: ParamOrdering,
    image: Image,
    var_noise: f64,
    snrs: Vec<f64>,
    steps: ParamMap<f64>,
    derivative_images: ParamMap<Image>,
    second_derivative_images: PairMap<Image>,
    fisher_matrix_images: PairMap<Image>,
    fisher_matrix: PairMap<f64>,
    fisher_condition_number: f64,
    covariance_matrix: PairMap<f64>,
    correlation_matrix: PairMap<f64>,
    bias_matrix_images: TripleMap<Image>,
    bias_matrix: TripleMap<f64>,
    bias_images: ParamMap<Image>,
    biases: ParamMap<f64>,
}

/// Noise variance and per-galaxy SNRs (reference galaxy first).
fn resolve_noise<P, R, N>(
    params: &P,
    renderer: &R,
    noise: &N,
    config: &AnalysisConfig,
    image: &Image,
) -> FisherResult<(f64, Vec<f64>)>
where
    P: ParameterSet + ?Sized,
    R: Renderer + ?Sized,
    N: NoiseModel + ?Sized,
{
    if let Some(var_noise) = config.var_noise {
        return Ok((ensure_noise_variance(var_noise)?, Vec::new()));
    }

    match params.num_galaxies() {
        0 => Err(FisherError::ConfigError(
            "parameter set describes no galaxies".to_string(),
        )),
        1 => {
            let (_, var_noise) = noise.add_noise(image, config.snr, config.noise_seed)?;
            Ok((ensure_noise_variance(var_noise)?, vec![config.snr]))
        }
        n => {
            // The reference galaxy alone fixes the variance; the others are
            // reported at that variance.
            let reference = renderer.render(&params.galaxy_params(0)?)?;
            let (_, var_noise) = noise.add_noise(&reference, config.snr, config.noise_seed)?;
            let var_noise = ensure_noise_variance(var_noise)?;

            let mut snrs = Vec::with_capacity(n);
            snrs.push(config.snr);
            for g in 1..n {
                let galaxy = renderer.render(&params.galaxy_params(g)?)?;
                let snr = noise.snr(&galaxy, var_noise);
                if !snr.is_finite() {
                    log::warn!("galaxy {g}: non-finite SNR {snr}");
                }
                snrs.push(snr);
            }
            Ok((var_noise, snrs))
        }
    }
}

impl FisherAnalysis {
    /// Run the full analysis.
    ///
    /// Fails on precondition violations (empty ordering, bad steps, shape
    /// mismatches), numerical failures (invalid variance, singular Fisher
    /// matrix, non-positive covariance diagonal) and renderer errors, which
    /// are returned unchanged.
    pub fn new<P, R, S, N>(
        params: &P,
        renderer: &R,
        step_policy: &S,
        noise: &N,
        config: &AnalysisConfig,
    ) -> FisherResult<Self>
    where
        P: ParameterSet + ?Sized,
        R: Renderer + ?Sized,
        S: StepPolicy + ?Sized,
        N: NoiseModel + ?Sized,
    {
        config.validate()?;
        let param_names = params.param_names().clone();
        let values = params.params();
        values.ensure_covers(&param_names)?;

        let image = renderer.render(values)?;
        let (var_noise, snrs) = resolve_noise(params, renderer, noise, config, &image)?;
        let steps = validate_steps(&param_names, &step_policy.steps(params, renderer)?)?;
        log::debug!(
            "Fisher analysis: {} parameters, stamp {:?}, var_noise {:.6e}",
            param_names.len(),
            image.dim(),
            var_noise
        );

        let derivative_images =
            first_derivative_images(renderer, values, &steps, config.parallel)?;
        let second_derivative_images =
            second_derivative_images(renderer, values, &steps, config.parallel)?;

        let fisher_matrix_images = fisher_matrix_images(&derivative_images, var_noise)?;
        let fisher_matrix = fisher_matrix(&fisher_matrix_images);
        let fisher_condition_number = fisher_condition_number(&fisher_matrix)?;
        if fisher_condition_number > config.condition_warning {
            log::warn!(
                "Fisher matrix is ill-conditioned: condition number {:.3e} > {:.1e}",
                fisher_condition_number,
                config.condition_warning
            );
        }

        let covariance_matrix = covariance_matrix(&fisher_matrix, config.max_condition_number)?;
        let correlation_matrix = correlation_matrix(&covariance_matrix)?;

        let bias_matrix_images =
            bias_matrix_images(&derivative_images, &second_derivative_images, var_noise)?;
        let bias_matrix = bias_matrix(&bias_matrix_images);
        let bias_images = bias_images(&covariance_matrix, &bias_matrix_images, config.parallel)?;
        let biases = biases(&bias_images);

        log::info!(
            "Fisher analysis complete: {} parameters, var_noise {:.6e}, condition number {:.3e}",
            param_names.len(),
            var_noise,
            fisher_condition_number
        );

        Ok(Self {
            param_names,
            image,
            var_noise,
            snrs,
            steps,
            derivative_images,
            second_derivative_images,
            fisher_matrix_images,
            fisher_matrix,
            fisher_condition_number,
            covariance_matrix,
            correlation_matrix,
            bias_matrix_images,
            bias_matrix,
            bias_images,
            biases,
        })
    }

    /// Analysis with `FixedSteps` from `config.steps` and `GaussianNoise`.
    pub fn with_defaults<P, R>(
        params: &P,
        renderer: &R,
        config: &AnalysisConfig,
    ) -> FisherResult<Self>
    where
        P: ParameterSet + ?Sized,
        R: Renderer + ?Sized,
    {
        let steps = FixedSteps::from(&config.steps);
        Self::new(params, renderer, &steps, &GaussianNoise, config)
    }

    pub fn param_names(&self) -> &ParamOrdering {
        &self.param_names
    }

    pub fn num_params(&self) -> usize {
        self.param_names.len()
    }

    /// Noise-free rendering of the base parameters.
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn var_noise(&self) -> f64 {
        self.var_noise
    }

    /// SNR of each galaxy at the shared variance; empty when the variance
    /// was supplied directly.
    pub fn snrs(&self) -> &[f64] {
        &self.snrs
    }

    pub fn steps(&self) -> &ParamMap<f64> {
        &self.steps
    }

    pub fn derivative_images(&self) -> &ParamMap<Image> {
        &self.derivative_images
    }

    pub fn second_derivative_images(&self) -> &PairMap<Image> {
        &self.second_derivative_images
    }

    pub fn fisher_matrix_images(&self) -> &PairMap<Image> {
        &self.fisher_matrix_images
    }

    pub fn fisher_matrix(&self) -> &PairMap<f64> {
        &self.fisher_matrix
    }

    pub fn fisher_condition_number(&self) -> f64 {
        self.fisher_condition_number
    }

    pub fn covariance_matrix(&self) -> &PairMap<f64> {
        &self.covariance_matrix
    }

    pub fn correlation_matrix(&self) -> &PairMap<f64> {
        &self.correlation_matrix
    }

    pub fn bias_matrix_images(&self) -> &TripleMap<Image> {
        &self.bias_matrix_images
    }

    pub fn bias_matrix(&self) -> &TripleMap<f64> {
        &self.bias_matrix
    }

    pub fn bias_images(&self) -> &ParamMap<Image> {
        &self.bias_images
    }

    pub fn biases(&self) -> &ParamMap<f64> {
        &self.biases
    }

    /// Dense form of a pair matrix, rows and columns in `param_names` order.
    pub fn matrix_to_dense(&self, matrix: &PairMap<f64>) -> FisherResult<Array2<f64>> {
        if matrix.ordering() != &self.param_names {
            return Err(FisherError::ConfigError(
                "matrix is indexed by a different parameter ordering".to_string(),
            ));
        }
        Ok(to_dense(matrix))
    }

    pub fn dense_to_matrix(&self, dense: &Array2<f64>) -> FisherResult<PairMap<f64>> {
        to_named(&self.param_names, dense)
    }
}
