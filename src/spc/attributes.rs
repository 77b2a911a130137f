//! Attributes control charts: P, NP, C, and U charts.
//!
//! These charts monitor discrete (count/proportion) data. Limits come from
//! the binomial (P, NP) or Poisson (C, U) variance rather than from
//! tabulated factors, so `sigma_level` multiplies sigma directly.
//!
//! # Chart Selection Guide
//!
//! | Chart | Data Type | Sample Size |
//! |-------|-----------|-------------|
//! | P     | Proportion defective | Variable |
//! | NP    | Count defective | Constant |
//! | C     | Count of defects | Constant area |
//! | U     | Defects per unit | Variable area |
//!
//! Variable sample sizes are summarised by their average `n-bar`; a single
//! pair of limits is produced per chart rather than one pair per sample.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 7: Control Charts for Attributes.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use tracing::debug;

use super::chart::ControlLimits;
use crate::descriptive::mean;

/// Proportion nonconforming (P) chart limits.
///
/// # Formulas
///
/// - p_i = defects_i / n_i, CL = p-bar = mean of p_i
/// - sigma = sqrt(p-bar · (1 - p-bar) / n-bar)
/// - UCL = max(0, p-bar + k · sigma), LCL = max(0, p-bar - k · sigma)
///
/// Returns [`ControlLimits::zero`] when either slice is empty or the average
/// sample size is not positive.
///
/// # Examples
///
/// ```
/// use u_spc::spc::p_limits;
///
/// let limits = p_limits(&[5.0, 10.0], &[100.0, 100.0], 3.0);
/// assert!((limits.cl - 0.075).abs() < 1e-12);
/// assert!(limits.lcl >= 0.0);
/// ```
pub fn p_limits(defects: &[f64], sample_sizes: &[f64], sigma_level: f64) -> ControlLimits {
    let Some(n_bar) = average_size(defects, sample_sizes, "p") else {
        return ControlLimits::zero();
    };

    let p_bar = mean(&proportions(defects, sample_sizes));
    let sigma = (p_bar * (1.0 - p_bar) / n_bar).sqrt();
    ControlLimits {
        ucl: (p_bar + sigma_level * sigma).max(0.0),
        lcl: (p_bar - sigma_level * sigma).max(0.0),
        cl: p_bar,
        sigma,
    }
}

/// Count of nonconforming items (NP) chart limits for a constant sample size.
///
/// # Formulas
///
/// - CL = mean count, p-bar = CL / n
/// - sigma = sqrt(n · p-bar · (1 - p-bar))
/// - UCL = CL + k · sigma, LCL = max(0, CL - k · sigma)
///
/// Returns [`ControlLimits::zero`] for empty input or `sample_size <= 0`.
pub fn np_limits(defects: &[f64], sample_size: f64, sigma_level: f64) -> ControlLimits {
    if defects.is_empty() || sample_size <= 0.0 {
        debug!(
            samples = defects.len(),
            sample_size, "np chart needs counts and a positive sample size"
        );
        return ControlLimits::zero();
    }

    let np_bar = mean(defects);
    let p_bar = np_bar / sample_size;
    let sigma = (sample_size * p_bar * (1.0 - p_bar)).sqrt();
    ControlLimits {
        ucl: np_bar + sigma_level * sigma,
        lcl: (np_bar - sigma_level * sigma).max(0.0),
        cl: np_bar,
        sigma,
    }
}

/// Count of defects (C) chart limits.
///
/// # Formulas
///
/// - CL = c-bar = mean count, sigma = sqrt(c-bar)
/// - UCL = c-bar + k · sigma, LCL = max(0, c-bar - k · sigma)
///
/// # Examples
///
/// ```
/// use u_spc::spc::c_limits;
///
/// let limits = c_limits(&[4.0, 4.0, 4.0], 3.0);
/// assert_eq!(limits.cl, 4.0);
/// assert_eq!(limits.sigma, 2.0);
/// assert_eq!(limits.ucl, 10.0);
/// assert_eq!(limits.lcl, 0.0);
/// ```
pub fn c_limits(defects: &[f64], sigma_level: f64) -> ControlLimits {
    if defects.is_empty() {
        debug!("c chart has no counts, returning zero limits");
        return ControlLimits::zero();
    }

    let c_bar = mean(defects);
    let sigma = c_bar.sqrt();
    ControlLimits {
        ucl: c_bar + sigma_level * sigma,
        lcl: (c_bar - sigma_level * sigma).max(0.0),
        cl: c_bar,
        sigma,
    }
}

/// Defects per unit (U) chart limits.
///
/// `rates` are already defects per unit; `sample_sizes` are the inspection
/// units behind each rate.
///
/// # Formulas
///
/// - CL = u-bar = mean rate, sigma = sqrt(u-bar / n-bar)
/// - UCL = u-bar + k · sigma, LCL = max(0, u-bar - k · sigma)
pub fn u_limits(rates: &[f64], sample_sizes: &[f64], sigma_level: f64) -> ControlLimits {
    let Some(n_bar) = average_size(rates, sample_sizes, "u") else {
        return ControlLimits::zero();
    };

    let u_bar = mean(rates);
    let sigma = (u_bar / n_bar).sqrt();
    ControlLimits {
        ucl: u_bar + sigma_level * sigma,
        lcl: (u_bar - sigma_level * sigma).max(0.0),
        cl: u_bar,
        sigma,
    }
}

/// Per-sample proportions `defects_i / n_i`.
///
/// Pairs beyond the shorter slice are dropped; a non-positive size yields 0.
pub fn proportions(defects: &[f64], sample_sizes: &[f64]) -> Vec<f64> {
    defects
        .iter()
        .zip(sample_sizes)
        .map(|(&d, &n)| if n > 0.0 { d / n } else { 0.0 })
        .collect()
}

fn average_size(values: &[f64], sample_sizes: &[f64], chart: &'static str) -> Option<f64> {
    if values.is_empty() || sample_sizes.is_empty() {
        debug!(
            chart,
            samples = values.len(),
            sizes = sample_sizes.len(),
            "missing samples or sample sizes, returning zero limits"
        );
        return None;
    }
    let n_bar = mean(sample_sizes);
    if n_bar <= 0.0 {
        debug!(chart, n_bar, "average sample size not positive");
        return None;
    }
    Some(n_bar)
}
