// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Fisher Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense numerics for the Fisher analysis: small-matrix linear algebra and
//! the bridge between name-keyed and dense matrices.

pub mod labeling;
pub mod linalg;
