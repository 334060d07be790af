// ─────────────────────────────────────────────────────────────────────
// Galaxy Fisher Core — Fisher Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fisher information, covariance and nonlinearity bias of rendered galaxy models.
//!
//! Stage 1: model collaborators (renderer, parameter set, noise, steps)
//! Stage 2: derivative engine, Fisher assembler, covariance, bias engine
//! Stage 3: `FisherAnalysis` orchestration

pub mod analysis;
pub mod bias;
pub mod covariance;
pub mod derivatives;
pub mod fisher;
pub mod model;
pub mod noise;
mod par;
pub mod steps;
