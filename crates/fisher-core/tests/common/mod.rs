// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Shared Test Renderers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![allow(dead_code)]

use fisher_core::model::Renderer;
use fisher_types::error::FisherResult;
use fisher_types::params::{GroupedParameters, ParamOrdering, ParamVector};
use fisher_types::state::Image;

/// I = a·u + b²·v. Linear in `a`, quadratic in `b`.
pub struct LinearQuadratic {
    pub u: Image,
    pub v: Image,
}

impl LinearQuadratic {
    pub fn stamp3() -> Self {
        Self {
            u: Image::from_shape_fn((3, 3), |(r, c)| (r * 3 + c + 1) as f64),
            v: ndarray::array![[0.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 0.0]],
        }
    }
}

impl Renderer for LinearQuadratic {
    fn render(&self, p: &ParamVector) -> FisherResult<Image> {
        let a = p.get("a")?;
        let b = p.get("b")?;
        Ok(&self.u * a + &self.v * (b * b))
    }
}

/// Circular Gaussian profile I = flux · exp(-((x-x0)² + (y-y0)²) / 2σ²).
pub struct GaussianBlob {
    pub size: usize,
}

impl GaussianBlob {
    fn draw(&self, flux: f64, x0: f64, y0: f64, sigma: f64) -> Image {
        Image::from_shape_fn((self.size, self.size), |(y, x)| {
            let dx = x as f64 - x0;
            let dy = y as f64 - y0;
            flux * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
        })
    }
}

impl Renderer for GaussianBlob {
    fn render(&self, p: &ParamVector) -> FisherResult<Image> {
        Ok(self.draw(p.get("flux")?, p.get("x0")?, p.get("y0")?, p.get("sigma")?))
    }
}

/// Sum of Gaussian blobs, one per galaxy suffix present in the vector
/// (`flux_1`, `x0_1`, ... `flux_2`, ...). Missing galaxies are not drawn.
pub struct BlendRenderer {
    pub size: usize,
    pub sigma: f64,
}

impl Renderer for BlendRenderer {
    fn render(&self, p: &ParamVector) -> FisherResult<Image> {
        let blob = GaussianBlob { size: self.size };
        let mut image = Image::zeros((self.size, self.size));
        for g in 1..=2 {
            let flux = format!("flux_{g}");
            if !p.contains(&flux) {
                continue;
            }
            image += &blob.draw(
                p.get(&flux)?,
                p.get(&format!("x0_{g}"))?,
                p.get(&format!("y0_{g}"))?,
                self.sigma,
            );
        }
        Ok(image)
    }
}

pub fn blob_params() -> GroupedParameters {
    let ordering = ParamOrdering::new(["flux", "x0", "y0", "sigma"]).unwrap();
    let values: ParamVector = [("flux", 40.0), ("x0", 7.3), ("y0", 6.8), ("sigma", 2.1)]
        .into_iter()
        .collect();
    GroupedParameters::single(ordering, values).unwrap()
}

pub fn ab_params(a: f64, b: f64) -> GroupedParameters {
    let ordering = ParamOrdering::new(["a", "b"]).unwrap();
    let values: ParamVector = [("a", a), ("b", b)].into_iter().collect();
    GroupedParameters::single(ordering, values).unwrap()
}
