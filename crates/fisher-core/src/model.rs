// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Model Collaborators
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Interfaces of the collaborators the analysis consumes.

use fisher_types::error::FisherResult;
use fisher_types::params::{GroupedParameters, ParamOrdering, ParamVector};
use fisher_types::state::Image;

/// Deterministic galaxy image renderer on a fixed stamp.
pub trait Renderer: Sync {
    fn render(&self, params: &ParamVector) -> FisherResult<Image>;

    /// Render used for finite differences. Renderers that mask or crop the
    /// observed image return the untouched stamp here.
    fn render_partial(&self, params: &ParamVector) -> FisherResult<Image> {
        self.render(params)
    }
}

impl<F> Renderer for F
where
    F: Fn(&ParamVector) -> FisherResult<Image> + Sync,
{
    fn render(&self, params: &ParamVector) -> FisherResult<Image> {
        self(params)
    }
}

/// Parameters of the analysed galaxies.
pub trait ParameterSet {
    /// Ordering of the fitted parameters.
    fn param_names(&self) -> &ParamOrdering;

    /// Current values of every parameter.
    fn params(&self) -> &ParamVector;

    fn num_galaxies(&self) -> usize;

    /// Values belonging to galaxy `index` only; galaxy 0 is the reference.
    fn galaxy_params(&self, index: usize) -> FisherResult<ParamVector>;
}

impl ParameterSet for GroupedParameters {
    fn param_names(&self) -> &ParamOrdering {
        &self.ordering
    }

    fn params(&self) -> &ParamVector {
        &self.values
    }

    fn num_galaxies(&self) -> usize {
        GroupedParameters::num_galaxies(self)
    }

    fn galaxy_params(&self, index: usize) -> FisherResult<ParamVector> {
        self.galaxy(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fisher_types::error::FisherError;

    fn render_twice<R: Renderer>(
        renderer: &R,
        params: &ParamVector,
    ) -> FisherResult<(Image, Image)> {
        Ok((renderer.render(params)?, renderer.render_partial(params)?))
    }

    #[test]
    fn test_closure_renderer_defaults_partial_to_render() {
        let params: ParamVector = [("flux", 2.0)].into_iter().collect();
        let (full, partial) = render_twice(
            &|p: &ParamVector| -> FisherResult<Image> {
                Ok(Image::from_elem((2, 2), p.get("flux")?))
            },
            &params,
        )
        .unwrap();
        assert_eq!(full, partial);
        assert!((full[[1, 1]] - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_closure_renderer_propagates_errors() {
        let params: ParamVector = [("flux", 2.0)].into_iter().collect();
        let result = render_twice(
            &|p: &ParamVector| -> FisherResult<Image> {
                Ok(Image::from_elem((2, 2), p.get("hlr")?))
            },
            &params,
        );
        assert!(matches!(result, Err(FisherError::UnknownParameter(name)) if name == "hlr"));
    }

    #[test]
    fn test_grouped_parameters_as_parameter_set() {
        let ordering = ParamOrdering::new(["flux", "hlr"]).unwrap();
        let values: ParamVector = [("flux", 1.0), ("hlr", 0.4)].into_iter().collect();
        let set = GroupedParameters::single(ordering, values).unwrap();
        assert_eq!(ParameterSet::num_galaxies(&set), 1);
        assert_eq!(set.param_names().len(), 2);
        assert_eq!(set.galaxy_params(0).unwrap(), *set.params());
    }
}
