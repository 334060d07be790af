// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parameter ordering and immutable parameter vectors.
//!
//! Every matrix and tensor in the analysis is indexed through one
//! [`ParamOrdering`]; values live in a [`ParamVector`] that is never mutated
//! in place, so perturbations for finite differences always produce copies.

use crate::error::{FisherError, FisherResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Fixed, non-empty sequence of unique parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ParamOrdering {
    names: Vec<String>,
}

impl ParamOrdering {
    pub fn new<I, S>(names: I) -> FisherResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(FisherError::EmptyOrdering);
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(FisherError::DuplicateParameter(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: construction rejects empty orderings.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Index of `name`, or `UnknownParameter`.
    pub fn require_index(&self, name: &str) -> FisherResult<usize> {
        self.index_of(name)
            .ok_or_else(|| FisherError::UnknownParameter(name.to_string()))
    }
}

impl TryFrom<Vec<String>> for ParamOrdering {
    type Error = FisherError;

    fn try_from(names: Vec<String>) -> FisherResult<Self> {
        Self::new(names)
    }
}

impl From<ParamOrdering> for Vec<String> {
    fn from(ordering: ParamOrdering) -> Self {
        ordering.names
    }
}

/// Immutable assignment of values to parameter names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamVector {
    values: BTreeMap<String, f64>,
}

impl ParamVector {
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> FisherResult<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| FisherError::UnknownParameter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Copy of `self` with `delta` added to `name`.
    pub fn perturbed(&self, name: &str, delta: f64) -> FisherResult<Self> {
        let mut values = self.values.clone();
        match values.get_mut(name) {
            Some(v) => *v += delta,
            None => return Err(FisherError::UnknownParameter(name.to_string())),
        }
        Ok(Self { values })
    }

    /// Copy restricted to `names`; every name must be present.
    pub fn subset<'a, I>(&self, names: I) -> FisherResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = BTreeMap::new();
        for name in names {
            values.insert(name.to_string(), self.get(name)?);
        }
        Ok(Self { values })
    }

    /// Fail unless every name of `ordering` has a value.
    pub fn ensure_covers(&self, ordering: &ParamOrdering) -> FisherResult<()> {
        for name in ordering.iter() {
            if !self.contains(name) {
                return Err(FisherError::UnknownParameter(name.to_string()));
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParamVector {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parameters of one or more galaxies rendered on the same stamp.
///
/// `groups[g]` lists the parameter names owned by galaxy `g`; galaxy 0 is
/// the reference galaxy whose SNR fixes the shared noise variance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedParameters {
    pub ordering: ParamOrdering,
    pub values: ParamVector,
    pub groups: Vec<Vec<String>>,
}

impl GroupedParameters {
    pub fn new(
        ordering: ParamOrdering,
        values: ParamVector,
        groups: Vec<Vec<String>>,
    ) -> FisherResult<Self> {
        values.ensure_covers(&ordering)?;
        if groups.is_empty() {
            return Err(FisherError::ConfigError(
                "at least one galaxy group is required".to_string(),
            ));
        }
        for name in groups.iter().flatten() {
            if !values.contains(name) {
                return Err(FisherError::UnknownParameter(name.clone()));
            }
        }
        Ok(Self {
            ordering,
            values,
            groups,
        })
    }

    /// Single galaxy owning every value.
    pub fn single(ordering: ParamOrdering, values: ParamVector) -> FisherResult<Self> {
        let group = values.iter().map(|(k, _)| k.to_string()).collect();
        Self::new(ordering, values, vec![group])
    }

    pub fn num_galaxies(&self) -> usize {
        self.groups.len()
    }

    /// Values of galaxy `index` only.
    pub fn galaxy(&self, index: usize) -> FisherResult<ParamVector> {
        let group = self.groups.get(index).ok_or_else(|| {
            FisherError::ConfigError(format!(
                "galaxy index {index} out of range (have {})",
                self.groups.len()
            ))
        })?;
        self.values.subset(group.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> ParamVector {
        [("flux", 1.0), ("hlr", 0.5), ("e1", 0.1)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_ordering_rejects_empty_and_duplicates() {
        assert!(matches!(
            ParamOrdering::new(Vec::<String>::new()),
            Err(FisherError::EmptyOrdering)
        ));
        assert!(matches!(
            ParamOrdering::new(["a", "b", "a"]),
            Err(FisherError::DuplicateParameter(name)) if name == "a"
        ));
    }

    #[test]
    fn test_ordering_indices() {
        let ord = ParamOrdering::new(["flux", "hlr", "e1"]).unwrap();
        assert_eq!(ord.len(), 3);
        assert_eq!(ord.index_of("hlr"), Some(1));
        assert_eq!(ord.name(2), "e1");
        assert!(ord.require_index("g2").is_err());
    }

    #[test]
    fn test_ordering_serde_validates() {
        let ord: ParamOrdering = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(ord.names(), &["x".to_string(), "y".to_string()]);
        assert!(serde_json::from_str::<ParamOrdering>("[]").is_err());
        assert!(serde_json::from_str::<ParamOrdering>(r#"["x", "x"]"#).is_err());
    }

    #[test]
    fn test_perturbed_leaves_original_untouched() {
        let base = vector();
        let up = base.perturbed("hlr", 0.01).unwrap();
        assert!((base.get("hlr").unwrap() - 0.5).abs() < 1e-15);
        assert!((up.get("hlr").unwrap() - 0.51).abs() < 1e-15);
        assert!((up.get("flux").unwrap() - 1.0).abs() < 1e-15);
        assert!(base.perturbed("g1", 0.01).is_err());
    }

    #[test]
    fn test_grouped_parameters_split_galaxies() {
        let ord = ParamOrdering::new(["flux_1", "flux_2"]).unwrap();
        let values: ParamVector = [("flux_1", 2.0), ("flux_2", 3.0)].into_iter().collect();
        let groups = vec![vec!["flux_1".to_string()], vec!["flux_2".to_string()]];
        let params = GroupedParameters::new(ord, values, groups).unwrap();
        assert_eq!(params.num_galaxies(), 2);
        let second = params.galaxy(1).unwrap();
        assert_eq!(second.len(), 1);
        assert!((second.get("flux_2").unwrap() - 3.0).abs() < 1e-15);
        assert!(params.galaxy(2).is_err());
    }

    #[test]
    fn test_grouped_parameters_requires_values_for_ordering() {
        let ord = ParamOrdering::new(["flux", "hlr"]).unwrap();
        let values: ParamVector = [("flux", 2.0)].into_iter().collect();
        assert!(GroupedParameters::single(ord, values).is_err());
    }
}
