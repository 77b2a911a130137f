//! Process capability analysis.
//!
//! Computes standard capability indices for assessing how well a process
//! meets specification limits.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Pp**, **Ppk** — Reported alongside, equal to Cp and Cpk
//!
//! # Sigma Level
//!
//! - [`tail_ppm`] — One-sided defect rate for a sigma level
//! - [`normal_cdf`], [`erf`] — Abramowitz & Stegun approximations
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;
mod sigma_level;

pub use indices::{capability_from_moments, process_capability, ProcessCapability, SpecificationLimits};
pub use sigma_level::{erf, normal_cdf, tail_ppm};
