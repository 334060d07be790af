// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Derivative Images
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Centered finite-difference derivative images of a rendered model.
//!
//! First derivative of parameter p with step h:
//!   ∂I/∂p ≈ [I(p + h) - I(p - h)] / 2h
//! Mixed second derivative of (i, j):
//!   ∂²I/∂i∂j ≈ [I(++) + I(--) - I(-+) - I(+-)] / 4 h_i h_j
//! The same formula is used on the diagonal i = j, where it is the axis
//! formula with a doubled step.

use crate::model::Renderer;
use crate::par::collect_indexed;
use crate::steps::check_step;
use fisher_types::error::FisherResult;
use fisher_types::named::{PairMap, ParamMap};
use fisher_types::params::ParamVector;
use fisher_types::state::{ensure_shape, Image, ImageShape};

/// Fail unless every image shares the shape of the first one; returns it.
pub fn ensure_common_shape<'a, I>(images: I) -> FisherResult<Option<ImageShape>>
where
    I: IntoIterator<Item = &'a Image>,
{
    let mut shape = None;
    for img in images {
        match shape {
            None => shape = Some(img.dim()),
            Some(expected) => ensure_shape(img, expected)?,
        }
    }
    Ok(shape)
}

fn check_steps(steps: &ParamMap<f64>) -> FisherResult<()> {
    for ([name], &step) in steps.iter_named() {
        check_step(name, step)?;
    }
    Ok(())
}

/// `∂image/∂param` for every parameter of `steps.ordering()`.
pub fn first_derivative_images<R>(
    renderer: &R,
    params: &ParamVector,
    steps: &ParamMap<f64>,
    parallel: bool,
) -> FisherResult<ParamMap<Image>>
where
    R: Renderer + ?Sized,
{
    check_steps(steps)?;
    let ordering = steps.ordering();
    params.ensure_covers(ordering)?;

    let images = collect_indexed(ordering.len(), parallel, |i| {
        let name = ordering.name(i);
        let h = steps[i];
        let up = renderer.render_partial(&params.perturbed(name, h)?)?;
        let down = renderer.render_partial(&params.perturbed(name, -h)?)?;
        ensure_shape(&down, up.dim())?;
        Ok((up - down) / (2.0 * h))
    })?;
    let shape = ensure_common_shape(&images)?;
    log::debug!(
        "first derivatives: {} parameters, stamp {:?}",
        ordering.len(),
        shape
    );
    ParamMap::from_vec(ordering, images)
}

/// `∂²image/∂param_i∂param_j` for every ordered pair (i, j).
///
/// Both triangles are evaluated independently; four renders per pair.
pub fn second_derivative_images<R>(
    renderer: &R,
    params: &ParamVector,
    steps: &ParamMap<f64>,
    parallel: bool,
) -> FisherResult<PairMap<Image>>
where
    R: Renderer + ?Sized,
{
    check_steps(steps)?;
    let ordering = steps.ordering();
    params.ensure_covers(ordering)?;
    let p = ordering.len();

    let images = collect_indexed(p * p, parallel, |flat| {
        let (i, j) = (flat / p, flat % p);
        let (name_i, name_j) = (ordering.name(i), ordering.name(j));
        let (h_i, h_j) = (steps[i], steps[j]);

        let corner = |di: f64, dj: f64| -> FisherResult<Image> {
            let shifted = params.perturbed(name_i, di)?.perturbed(name_j, dj)?;
            renderer.render_partial(&shifted)
        };
        let up_up = corner(h_i, h_j)?;
        let down_up = corner(-h_i, h_j)?;
        let up_down = corner(h_i, -h_j)?;
        let down_down = corner(-h_i, -h_j)?;
        let shape = up_up.dim();
        for img in [&down_up, &up_down, &down_down] {
            ensure_shape(img, shape)?;
        }

        Ok((&up_up + &down_down - &down_up - &up_down) / (4.0 * h_i * h_j))
    })?;
    let shape = ensure_common_shape(&images)?;
    log::debug!(
        "second derivatives: {} pairs, stamp {:?}",
        images.len(),
        shape
    );
    PairMap::from_vec(ordering, images)
}
