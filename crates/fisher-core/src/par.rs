// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Parallel Helpers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use fisher_types::error::FisherResult;
use rayon::prelude::*;

/// Evaluate `f(0..count)` into a vector in index order, optionally on the
/// rayon pool. Each index owns its slot, so no synchronisation is needed.
pub(crate) fn collect_indexed<T, F>(count: usize, parallel: bool, f: F) -> FisherResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> FisherResult<T> + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}
