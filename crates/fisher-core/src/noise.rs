// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Noise
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Signal-to-noise helpers and the reference Gaussian noise model.

use fisher_types::error::{FisherError, FisherResult};
use fisher_types::state::Image;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// SNR of `image` under white noise of variance `var_noise`:
/// sqrt(Σ pixel² / var_noise).
pub fn get_snr(image: &Image, var_noise: f64) -> f64 {
    (image.iter().map(|v| v * v).sum::<f64>() / var_noise).sqrt()
}

/// Variance that gives `image` the requested SNR: Σ pixel² / snr².
pub fn variance_for_snr(image: &Image, snr: f64) -> FisherResult<f64> {
    if !snr.is_finite() || snr <= 0.0 {
        return Err(FisherError::ConfigError(format!(
            "snr must be finite and > 0, got {snr}"
        )));
    }
    Ok(image.iter().map(|v| v * v).sum::<f64>() / (snr * snr))
}

/// Fail with `InvalidNoiseVariance` unless `var_noise` is finite and > 0.
pub fn ensure_noise_variance(var_noise: f64) -> FisherResult<f64> {
    if !var_noise.is_finite() || var_noise <= 0.0 {
        return Err(FisherError::InvalidNoiseVariance(var_noise));
    }
    Ok(var_noise)
}

pub trait NoiseModel {
    /// Noisy copy of `image` at the target SNR and the variance used.
    fn add_noise(&self, image: &Image, snr: f64, seed: u64) -> FisherResult<(Image, f64)>;

    fn snr(&self, image: &Image, var_noise: f64) -> f64 {
        get_snr(image, var_noise)
    }
}

/// Stationary zero-mean Gaussian pixel noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianNoise;

impl NoiseModel for GaussianNoise {
    fn add_noise(&self, image: &Image, snr: f64, seed: u64) -> FisherResult<(Image, f64)> {
        let var_noise = variance_for_snr(image, snr)?;
        let normal = Normal::new(0.0, var_noise.sqrt())
            .map_err(|e| FisherError::ConfigError(format!("noise distribution: {e}")))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let noisy = image.mapv(|v| v + normal.sample(&mut rng));
        Ok((noisy, var_noise))
    }
}
