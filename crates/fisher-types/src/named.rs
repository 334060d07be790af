// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Named Matrices
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parameter-name keyed matrices and tensors.
//!
//! A [`Named`] value holds one entry for every ordered tuple of parameters
//! of a [`ParamOrdering`], stored row-major. Entries are reached either by
//! numeric index (`m[[i, j]]`) or by names (`m.get(["flux", "hlr"])`).
//! Because the storage is dense, a named matrix is fully populated by
//! construction; sparse name-keyed maps are only accepted through
//! [`Named::from_entries`], which checks completeness.

use crate::error::{FisherError, FisherResult};
use crate::params::ParamOrdering;
use std::collections::HashMap;
use std::ops::Index;

/// Entries keyed by `N`-tuples of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Named<T, const N: usize> {
    ordering: ParamOrdering,
    entries: Vec<T>,
}

/// Per-parameter values (derivative images, biases).
pub type ParamMap<T> = Named<T, 1>;
/// Per-pair values (Fisher, covariance, correlation, second derivatives).
pub type PairMap<T> = Named<T, 2>;
/// Per-triple values (bias matrix).
pub type TripleMap<T> = Named<T, 3>;

fn entry_count(p: usize, rank: usize) -> usize {
    p.pow(rank as u32)
}

impl<T, const N: usize> Named<T, N> {
    /// Build by evaluating `f` for every index tuple in row-major order.
    pub fn from_fn<F>(ordering: &ParamOrdering, mut f: F) -> Self
    where
        F: FnMut([usize; N]) -> T,
    {
        let p = ordering.len();
        let entries = (0..entry_count(p, N))
            .map(|flat| f(unflatten::<N>(flat, p)))
            .collect();
        Self {
            ordering: ordering.clone(),
            entries,
        }
    }

    /// Fallible [`Named::from_fn`]; stops at the first error.
    pub fn try_from_fn<F, E>(ordering: &ParamOrdering, mut f: F) -> Result<Self, E>
    where
        F: FnMut([usize; N]) -> Result<T, E>,
    {
        let p = ordering.len();
        let entries = (0..entry_count(p, N))
            .map(|flat| f(unflatten::<N>(flat, p)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self {
            ordering: ordering.clone(),
            entries,
        })
    }

    /// Wrap row-major `entries`; the length must be `P^N`.
    pub fn from_vec(ordering: &ParamOrdering, entries: Vec<T>) -> FisherResult<Self> {
        let expected = entry_count(ordering.len(), N);
        if entries.len() != expected {
            return Err(FisherError::MissingEntry(format!(
                "expected {expected} entries, got {}",
                entries.len()
            )));
        }
        Ok(Self {
            ordering: ordering.clone(),
            entries,
        })
    }

    pub fn ordering(&self) -> &ParamOrdering {
        &self.ordering
    }

    /// Number of parameters along each axis.
    pub fn dim(&self) -> usize {
        self.ordering.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }

    /// Entry addressed by parameter names.
    pub fn get(&self, names: [&str; N]) -> FisherResult<&T> {
        let mut index = [0usize; N];
        for (slot, name) in index.iter_mut().zip(names) {
            *slot = self.ordering.require_index(name)?;
        }
        Ok(&self[index])
    }

    /// `(index tuple, entry)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; N], &T)> {
        let p = self.dim();
        self.entries
            .iter()
            .enumerate()
            .map(move |(flat, v)| (unflatten::<N>(flat, p), v))
    }

    /// `(name tuple, entry)` pairs in row-major order.
    pub fn iter_named(&self) -> impl Iterator<Item = ([&str; N], &T)> {
        self.iter()
            .map(move |(index, v)| (index.map(|i| self.ordering.name(i)), v))
    }

    pub fn map<U, F>(&self, f: F) -> Named<U, N>
    where
        F: FnMut(&T) -> U,
    {
        Named {
            ordering: self.ordering.clone(),
            entries: self.entries.iter().map(f).collect(),
        }
    }

    fn flat_index(&self, index: [usize; N]) -> usize {
        let p = self.dim();
        index.iter().fold(0, |acc, &i| {
            assert!(i < p, "parameter index {i} out of range for {p} parameters");
            acc * p + i
        })
    }
}

impl<T: Clone, const N: usize> Named<T, N> {
    /// Build from a name-keyed dictionary; every tuple of `ordering` must be present.
    pub fn from_entries(
        ordering: &ParamOrdering,
        entries: &HashMap<[String; N], T>,
    ) -> FisherResult<Self> {
        Self::try_from_fn(ordering, |index| {
            let key = index.map(|i| ordering.name(i).to_string());
            entries
                .get(&key)
                .cloned()
                .ok_or_else(|| FisherError::MissingEntry(key.join(", ")))
        })
    }

    /// Name-keyed dictionary form.
    pub fn to_entries(&self) -> HashMap<[String; N], T> {
        self.iter_named()
            .map(|(names, v)| (names.map(str::to_string), v.clone()))
            .collect()
    }
}

impl<T, const N: usize> Index<[usize; N]> for Named<T, N> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &T {
        &self.entries[self.flat_index(index)]
    }
}

impl<T> Index<usize> for Named<T, 1> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self[[index]]
    }
}

impl<T> PairMap<T> {
    /// Entry at `(a, b)` by names.
    pub fn pair(&self, a: &str, b: &str) -> FisherResult<&T> {
        self.get([a, b])
    }
}

impl PairMap<f64> {
    /// Largest `|m[i,j] - m[j,i]|`.
    pub fn max_asymmetry(&self) -> f64 {
        let p = self.dim();
        let mut worst: f64 = 0.0;
        for i in 0..p {
            for j in (i + 1)..p {
                worst = worst.max((self[[i, j]] - self[[j, i]]).abs());
            }
        }
        worst
    }
}

fn unflatten<const N: usize>(mut flat: usize, p: usize) -> [usize; N] {
    let mut index = [0usize; N];
    for slot in index.iter_mut().rev() {
        *slot = flat % p;
        flat /= p;
    }
    index
}
