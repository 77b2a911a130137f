//! Variables control charts: X-bar-R, X-bar-S, and Individual-MR.
//!
//! These charts monitor continuous (variables) data from a process.
//! Subgroup charts (X-bar-R, X-bar-S) track the mean of small samples and
//! estimate sigma from within-subgroup variation; the Individual-MR chart
//! handles single observations using the moving range.
//!
//! # Sigma level scaling
//!
//! The factors A2, A3 and E2 are calibrated for 3-sigma limits. A request
//! for `k`-sigma limits multiplies the half-width by `k / 3`, so 2-sigma
//! limits are two thirds as wide as the standard ones.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 6: Control Charts for Variables.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use tracing::debug;

use super::chart::ControlLimits;
use super::constants::ControlConstants;
use crate::descriptive::{mean, range, standard_deviation};

/// E2 factor for Individual chart limits: X-bar ± E2 · MR-bar.
///
/// E2 = 3 / d2(n=2) = 3 / 1.128, rounded to 2.66.
pub const E2: f64 = 2.66;

/// d2 for a moving range of span 2.
pub const D2_MOVING_RANGE: f64 = 1.128;

/// Computes X-bar-R chart limits.
///
/// # Algorithm
///
/// 1. For each subgroup, compute the mean (X-bar) and range (R).
/// 2. CL = grand mean of the subgroup means, R-bar = mean of the ranges.
/// 3. sigma = R-bar / d2(n), UCL/LCL = CL ± A2 · R-bar · (k / 3).
///
/// The subgroup size `n` is taken from the first subgroup. Returns
/// [`ControlLimits::zero`] when there are no subgroups or `n < 2`.
///
/// # Examples
///
/// ```
/// use u_spc::spc::xbar_r_limits;
///
/// let subgroups = vec![
///     vec![25.0, 26.0, 24.5, 25.5, 25.0],
///     vec![25.2, 24.8, 25.1, 24.9, 25.3],
///     vec![25.1, 25.0, 24.7, 25.3, 24.9],
/// ];
/// let limits = xbar_r_limits(&subgroups, 3.0);
/// assert!(limits.ucl > limits.cl);
/// assert!(limits.cl > limits.lcl);
/// ```
pub fn xbar_r_limits(subgroups: &[Vec<f64>], sigma_level: f64) -> ControlLimits {
    let Some(k) = subgroup_constants(subgroups, "xbar-r") else {
        return ControlLimits::zero();
    };

    let means: Vec<f64> = subgroups.iter().map(|g| mean(g)).collect();
    let ranges: Vec<f64> = subgroups.iter().map(|g| range(g)).collect();
    let grand_mean = mean(&means);
    let r_bar = mean(&ranges);

    let half_width = k.a2 * r_bar * (sigma_level / 3.0);
    ControlLimits {
        ucl: grand_mean + half_width,
        lcl: grand_mean - half_width,
        cl: grand_mean,
        sigma: r_bar / k.d2,
    }
}

/// Computes X-bar-S chart limits.
///
/// # Algorithm
///
/// 1. For each subgroup, compute the mean and the sample standard deviation (S).
/// 2. CL = grand mean of the subgroup means, S-bar = mean of the S values.
/// 3. sigma = S-bar / c4(n), UCL/LCL = CL ± A3 · S-bar · (k / 3).
///
/// Returns [`ControlLimits::zero`] when there are no subgroups or `n < 2`.
pub fn xbar_s_limits(subgroups: &[Vec<f64>], sigma_level: f64) -> ControlLimits {
    let Some(k) = subgroup_constants(subgroups, "xbar-s") else {
        return ControlLimits::zero();
    };

    let means: Vec<f64> = subgroups.iter().map(|g| mean(g)).collect();
    let std_devs: Vec<f64> = subgroups
        .iter()
        .map(|g| standard_deviation(g, true))
        .collect();
    let grand_mean = mean(&means);
    let s_bar = mean(&std_devs);

    let half_width = k.a3 * s_bar * (sigma_level / 3.0);
    ControlLimits {
        ucl: grand_mean + half_width,
        lcl: grand_mean - half_width,
        cl: grand_mean,
        sigma: s_bar / k.c4,
    }
}

/// Computes Individual (I-MR) chart limits.
///
/// # Algorithm
///
/// 1. Moving ranges: MR_i = |x_i - x_{i-1}| for i >= 1.
/// 2. CL = mean of all observations, MR-bar = mean of the moving ranges.
/// 3. sigma = MR-bar / 1.128, UCL/LCL = CL ± 2.66 · MR-bar · (k / 3).
///
/// Needs at least two observations; returns [`ControlLimits::zero`] otherwise.
///
/// # Examples
///
/// ```
/// use u_spc::spc::individuals_limits;
///
/// let limits = individuals_limits(&[10.0, 12.0, 11.0, 13.0], 3.0);
/// // MR = [2, 1, 2], MR-bar = 5/3
/// assert!((limits.cl - 11.5).abs() < 1e-12);
/// assert!((limits.ucl - (11.5 + 2.66 * 5.0 / 3.0)).abs() < 1e-12);
/// ```
pub fn individuals_limits(values: &[f64], sigma_level: f64) -> ControlLimits {
    if values.len() < 2 {
        debug!(
            points = values.len(),
            "i-mr chart needs at least two observations"
        );
        return ControlLimits::zero();
    }

    let mr_bar = mean(&moving_ranges(values));
    let cl = mean(values);
    let half_width = E2 * mr_bar * (sigma_level / 3.0);
    ControlLimits {
        ucl: cl + half_width,
        lcl: cl - half_width,
        cl,
        sigma: mr_bar / D2_MOVING_RANGE,
    }
}

/// Absolute differences of consecutive observations (`len - 1` values).
pub fn moving_ranges(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

/// Mean of each subgroup, in order. These are the points an X-bar chart plots.
pub fn subgroup_means(subgroups: &[Vec<f64>]) -> Vec<f64> {
    subgroups.iter().map(|g| mean(g)).collect()
}

/// Factor row for the subgroup size of `subgroups[0]`, or `None` (logged)
/// when the input cannot produce limits.
fn subgroup_constants(subgroups: &[Vec<f64>], chart: &'static str) -> Option<ControlConstants> {
    let Some(first) = subgroups.first() else {
        debug!(chart, "no subgroups, returning zero limits");
        return None;
    };
    let constants = ControlConstants::for_subgroup_size(first.len());
    if constants.is_none() {
        debug!(
            chart,
            subgroup_size = first.len(),
            "subgroup size below 2, returning zero limits"
        );
    }
    constants
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five subgroups of n=5, each with mean 50 and range 2.
    fn flat_subgroups() -> Vec<Vec<f64>> {
        (0..5).map(|_| vec![49.0, 50.0, 50.0, 50.0, 51.0]).collect()
    }

    // --- X-bar-R ---

    #[test]
    fn test_xbar_r_textbook_scenario() {
        let limits = xbar_r_limits(&flat_subgroups(), 3.0);
        assert!((limits.cl - 50.0).abs() < 1e-12);
        assert!((limits.sigma - 2.0 / 2.326).abs() < 1e-12);
        assert!((limits.sigma - 0.8598).abs() < 1e-4);
        assert!((limits.ucl - 51.154).abs() < 1e-9);
        assert!((limits.lcl - 48.846).abs() < 1e-9);
    }

    #[test]
    fn test_xbar_r_basic_limits() {
        let subgroups = vec![
            vec![72.0, 84.0, 79.0, 49.0],
            vec![56.0, 87.0, 33.0, 42.0],
            vec![55.0, 73.0, 22.0, 60.0],
            vec![44.0, 80.0, 54.0, 74.0],
            vec![97.0, 26.0, 48.0, 58.0],
        ];
        let limits = xbar_r_limits(&subgroups, 3.0);
        let expected_grand_mean = (71.0 + 54.5 + 52.5 + 63.0 + 57.25) / 5.0;
        assert!((limits.cl - expected_grand_mean).abs() < 1e-9);

        // Ranges: 35, 54, 51, 36, 71 -> R-bar = 49.4
        let r_bar = 49.4;
        assert!((limits.ucl - (expected_grand_mean + 0.729 * r_bar)).abs() < 1e-9);
        assert!((limits.sigma - r_bar / 2.059).abs() < 1e-9);
    }

    #[test]
    fn test_xbar_r_sigma_level_scales_width() {
        let full = xbar_r_limits(&flat_subgroups(), 3.0);
        let two = xbar_r_limits(&flat_subgroups(), 2.0);
        let full_width = full.ucl - full.cl;
        let two_width = two.ucl - two.cl;
        assert!((two_width - full_width * 2.0 / 3.0).abs() < 1e-12);
        // sigma estimate does not depend on the requested level
        assert_eq!(full.sigma, two.sigma);
    }

    #[test]
    fn test_xbar_r_empty_and_undersized() {
        assert!(xbar_r_limits(&[], 3.0).is_zero());
        assert!(xbar_r_limits(&[vec![1.0], vec![2.0]], 3.0).is_zero());
    }

    #[test]
    fn test_xbar_r_large_subgroups_use_n25_factors() {
        let big: Vec<Vec<f64>> = (0..3)
            .map(|_| (0..30).map(|i| i as f64).collect())
            .collect();
        let limits = xbar_r_limits(&big, 3.0);
        // range 29 in every subgroup
        assert!((limits.sigma - 29.0 / 3.931).abs() < 1e-12);
        assert!((limits.ucl - limits.cl - 0.153 * 29.0).abs() < 1e-12);
    }

    #[test]
    fn test_xbar_r_constant_subgroups() {
        let limits = xbar_r_limits(&[vec![10.0, 10.0, 10.0], vec![10.0, 10.0, 10.0]], 3.0);
        assert!((limits.cl - 10.0).abs() < f64::EPSILON);
        assert_eq!(limits.ucl, limits.cl);
        assert_eq!(limits.lcl, limits.cl);
        assert_eq!(limits.sigma, 0.0);
    }

    // --- X-bar-S ---

    #[test]
    fn test_xbar_s_limits() {
        let subgroups = vec![vec![1.0, 2.0, 3.0], vec![2.0, 3.0, 4.0], vec![3.0, 4.0, 5.0]];
        let limits = xbar_s_limits(&subgroups, 3.0);
        // each subgroup has sample sd 1.0
        assert!((limits.cl - 3.0).abs() < 1e-12);
        assert!((limits.sigma - 1.0 / 0.8862).abs() < 1e-12);
        assert!((limits.ucl - (3.0 + 1.954)).abs() < 1e-12);
        assert!((limits.lcl - (3.0 - 1.954)).abs() < 1e-12);
    }

    #[test]
    fn test_xbar_s_empty() {
        assert!(xbar_s_limits(&[], 3.0).is_zero());
    }

    // --- Individual-MR ---

    #[test]
    fn test_individuals_limits() {
        let values = [25.0, 25.2, 24.8, 25.1, 24.9, 25.3, 25.0, 24.7];
        let limits = individuals_limits(&values, 3.0);
        let mr = moving_ranges(&values);
        assert_eq!(mr.len(), 7);
        let mr_bar = mr.iter().sum::<f64>() / 7.0;
        assert!((limits.sigma - mr_bar / 1.128).abs() < 1e-12);
        assert!((limits.ucl - limits.cl - 2.66 * mr_bar).abs() < 1e-12);
        assert!(limits.ucl > limits.cl && limits.cl > limits.lcl);
    }

    #[test]
    fn test_individuals_needs_two_points() {
        assert!(individuals_limits(&[], 3.0).is_zero());
        assert!(individuals_limits(&[5.0], 3.0).is_zero());
        assert!(!individuals_limits(&[5.0, 6.0], 3.0).is_zero());
    }

    #[test]
    fn test_subgroup_means() {
        assert_eq!(
            subgroup_means(&[vec![1.0, 3.0], vec![4.0, 6.0]]),
            vec![2.0, 5.0]
        );
    }
}
