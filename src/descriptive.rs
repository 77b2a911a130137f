//! Descriptive statistics over a sequence of observations.
//!
//! Every function is total: an empty slice yields `0.0` rather than an error
//! or `None`, so downstream chart and capability code never has to branch on
//! missing statistics. Inputs are never reordered; functions that need sorted
//! data sort a private copy.
//!
//! # Conventions
//!
//! - **Variance/StdDev**: `sample = true` uses Bessel's correction (`n - 1`),
//!   `sample = false` divides by `n`.
//! - **Quartiles**: nearest-rank (no interpolation) at `floor(n * 0.25)` and
//!   `floor(n * 0.75)` of the sorted data.
//! - **Skewness/Kurtosis**: moments of deviations standardized by the
//!   *sample* standard deviation, averaged over `n`. This mixes a sample
//!   scale estimate with a population moment and is kept as-is for parity
//!   with existing SPC reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Summary statistics for one sequence, as produced by [`describe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveSummary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle values on even length).
    pub median: f64,
    /// Most frequent value (first occurrence wins ties).
    pub mode: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Sample variance.
    pub variance: f64,
    /// `max - min`.
    pub range: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// First quartile (nearest rank).
    pub q1: f64,
    /// Third quartile (nearest rank).
    pub q3: f64,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
    /// Third standardized moment.
    pub skewness: f64,
    /// Excess kurtosis (fourth standardized moment minus 3).
    pub kurtosis: f64,
}

/// Quartiles of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// Value at rank `floor(n * 0.25)`.
    pub q1: f64,
    /// Median.
    pub q2: f64,
    /// Value at rank `floor(n * 0.75)`.
    pub q3: f64,
}

/// Computes the full descriptive summary of `values`.
///
/// # Examples
///
/// ```
/// use u_spc::descriptive::describe;
///
/// let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(s.count, 5);
/// assert!((s.mean - 3.0).abs() < 1e-12);
/// assert!((s.std_dev - 1.5811).abs() < 1e-4);
/// ```
pub fn describe(values: &[f64]) -> DescriptiveSummary {
    let sorted = sorted_copy(values);
    let q = quartiles_of_sorted(&sorted);
    DescriptiveSummary {
        count: values.len(),
        mean: mean(values),
        median: q.q2,
        mode: mode(values),
        std_dev: standard_deviation(values, true),
        variance: variance(values, true),
        range: range(values),
        min: min(values),
        max: max(values),
        q1: q.q1,
        q3: q.q3,
        iqr: q.q3 - q.q1,
        skewness: skewness(values),
        kurtosis: kurtosis(values),
    }
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; the average of the two middle values on even length.
///
/// # Examples
///
/// ```
/// use u_spc::descriptive::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
/// assert_eq!(median(&[]), 0.0);
/// ```
pub fn median(values: &[f64]) -> f64 {
    median_of_sorted(&sorted_copy(values))
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value.
///
/// Values are compared with exact `==`. When several values share the
/// highest frequency, the one that appears first in `values` is returned.
pub fn mode(values: &[f64]) -> f64 {
    // bits of the value -> (first index, count); -0.0 folds into 0.0 so keys agree with `==`
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::with_capacity(values.len());
    // NaN equals nothing, so each one is its own singleton
    let mut nans = Vec::new();
    for (i, &x) in values.iter().enumerate() {
        if x.is_nan() {
            nans.push((i, 1));
            continue;
        }
        let key = if x == 0.0 { 0.0_f64 } else { x }.to_bits();
        counts.entry(key).or_insert((i, 0)).1 += 1;
    }

    counts
        .into_values()
        .chain(nans)
        .max_by(|(ia, ca), (ib, cb)| ca.cmp(cb).then(ib.cmp(ia)))
        .map_or(0.0, |(first, _)| values[first])
}

/// Smallest value; `0.0` for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value; `0.0` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// `max - min`; `0.0` for an empty slice.
pub fn range(values: &[f64]) -> f64 {
    max(values) - min(values)
}

/// Variance of `values`.
///
/// The divisor is `n - 1` when `sample` is true, `n` otherwise. Returns
/// `0.0` when the divisor would be zero (empty input, or a single value
/// with `sample = true`).
///
/// # Examples
///
/// ```
/// use u_spc::descriptive::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v, false) - 4.0).abs() < 1e-12);
/// assert!((variance(&v, true) - 32.0 / 7.0).abs() < 1e-12);
/// ```
pub fn variance(values: &[f64], sample: bool) -> f64 {
    let n = values.len();
    let divisor = if sample { n.saturating_sub(1) } else { n };
    if divisor == 0 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|&x| (x - m) * (x - m)).sum();
    ss / divisor as f64
}

/// Standard deviation, the square root of [`variance`].
pub fn standard_deviation(values: &[f64], sample: bool) -> f64 {
    variance(values, sample).sqrt()
}

/// Nearest-rank quartiles.
///
/// `q1` and `q3` are the sorted values at indices `floor(n * 0.25)` and
/// `floor(n * 0.75)`; `q2` is the [`median`]. All zero for an empty slice.
pub fn quartiles(values: &[f64]) -> Quartiles {
    quartiles_of_sorted(&sorted_copy(values))
}

fn quartiles_of_sorted(sorted: &[f64]) -> Quartiles {
    if sorted.is_empty() {
        return Quartiles {
            q1: 0.0,
            q2: 0.0,
            q3: 0.0,
        };
    }
    let n = sorted.len() as f64;
    let rank = |p: f64| sorted[((n * p).floor() as usize).min(sorted.len() - 1)];
    Quartiles {
        q1: rank(0.25),
        q2: median_of_sorted(sorted),
        q3: rank(0.75),
    }
}

/// Skewness (third standardized moment).
///
/// Requires at least 3 observations and a non-zero standard deviation;
/// returns `0.0` otherwise.
pub fn skewness(values: &[f64]) -> f64 {
    standardized_moment(values, 3, 3)
}

/// Excess kurtosis (fourth standardized moment minus 3).
///
/// Requires at least 4 observations and a non-zero standard deviation;
/// returns `0.0` otherwise.
pub fn kurtosis(values: &[f64]) -> f64 {
    let m4 = standardized_moment(values, 4, 4);
    if m4 == 0.0 {
        return 0.0;
    }
    m4 - 3.0
}

/// Mean over `n` of `((x - mean) / s)^power` where `s` is the sample SD.
fn standardized_moment(values: &[f64], power: i32, min_len: usize) -> f64 {
    if values.len() < min_len {
        return 0.0;
    }
    let s = standard_deviation(values, true);
    if s == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let total: f64 = values.iter().map(|&x| ((x - m) / s).powi(power)).sum();
    total / values.len() as f64
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let s = describe(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.median, 0.0);
        assert_eq!(s.mode, 0.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.range, 0.0);
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 0.0);
        assert_eq!(s.q1, 0.0);
        assert_eq!(s.q3, 0.0);
        assert_eq!(s.iqr, 0.0);
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.kurtosis, 0.0);
    }

    #[test]
    fn one_to_five() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&v) - 3.0).abs() < 1e-12);
        assert!((median(&v) - 3.0).abs() < 1e-12);
        assert!((standard_deviation(&v, true) - 1.581_138_830_084_19).abs() < 1e-9);
        assert!((standard_deviation(&v, false) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((range(&v) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn median_even_length_averages() {
        assert!((median(&[1.0, 2.0, 3.0, 10.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn median_does_not_reorder_input() {
        let v = vec![5.0, 1.0, 3.0];
        let _ = median(&v);
        assert_eq!(v, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn mode_first_occurrence_wins_ties() {
        assert_eq!(mode(&[3.0, 1.0, 1.0, 3.0, 2.0]), 3.0);
        assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0]), 2.0);
        assert_eq!(mode(&[7.0, 8.0, 9.0]), 7.0);
    }

    #[test]
    fn mode_large_distinct_input() {
        let mut v: Vec<f64> = (0..200_000).map(f64::from).collect();
        assert_eq!(mode(&v), 0.0);
        v.push(123_456.0);
        assert_eq!(mode(&v), 123_456.0);
    }

    #[test]
    fn mode_treats_signed_zeros_as_equal() {
        assert_eq!(mode(&[1.0, -0.0, 0.0, 1.0, 0.0]), 0.0);
        assert_eq!(mode(&[f64::NAN, 2.0, f64::NAN, 2.0]), 2.0);
    }

    #[test]
    fn describe_matches_standalone_functions() {
        let v = [9.0, 2.0, 7.0, 4.0, 4.0, 1.0, 8.0];
        let s = describe(&v);
        let q = quartiles(&v);
        assert_eq!(s.median, median(&v));
        assert_eq!(s.q1, q.q1);
        assert_eq!(s.q3, q.q3);
        assert_eq!(s.mode, 4.0);
    }

    #[test]
    fn single_value_sample_variance_is_zero() {
        assert_eq!(variance(&[4.2], true), 0.0);
        assert_eq!(variance(&[4.2], false), 0.0);
    }

    #[test]
    fn quartiles_nearest_rank() {
        // sorted: 1..=8, floor(8*0.25)=2 -> 3, floor(8*0.75)=6 -> 7
        let v = [8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0];
        let q = quartiles(&v);
        assert_eq!(q.q1, 3.0);
        assert_eq!(q.q3, 7.0);
        assert!((q.q2 - 4.5).abs() < 1e-12);
    }

    #[test]
    fn quartiles_odd_length_q2_is_middle_rank() {
        let v = [9.0, 1.0, 5.0, 3.0, 7.0];
        let q = quartiles(&v);
        // floor(5*0.25)=1 -> 3, floor(5*0.75)=3 -> 7
        assert_eq!(q.q1, 3.0);
        assert_eq!(q.q2, 5.0);
        assert_eq!(q.q3, 7.0);
    }

    #[test]
    fn describe_iqr() {
        let s = describe(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert!((s.iqr - 4.0).abs() < 1e-12);
    }

    #[test]
    fn constant_sequence() {
        let v = [10.0; 12];
        assert_eq!(standard_deviation(&v, true), 0.0);
        assert_eq!(skewness(&v), 0.0);
        assert_eq!(kurtosis(&v), 0.0);
        assert_eq!(mode(&v), 10.0);
    }

    #[test]
    fn skewness_requires_three() {
        assert_eq!(skewness(&[1.0, 5.0]), 0.0);
    }

    #[test]
    fn kurtosis_requires_four() {
        assert_eq!(kurtosis(&[1.0, 2.0, 9.0]), 0.0);
    }

    #[test]
    fn skewness_uses_sample_sd_and_population_mean() {
        let v = [1.0, 2.0, 3.0, 10.0];
        let m = 4.0;
        let s = standard_deviation(&v, true);
        let expected: f64 = v.iter().map(|&x| ((x - m) / s).powi(3)).sum::<f64>() / 4.0;
        assert!((skewness(&v) - expected).abs() < 1e-12);
        assert!(skewness(&v) > 0.0);
    }

    #[test]
    fn kurtosis_exact_value() {
        let v = [1.0, 2.0, 3.0, 4.0];
        let m = 2.5;
        let s = standard_deviation(&v, true);
        let m4: f64 = v.iter().map(|&x| ((x - m) / s).powi(4)).sum::<f64>() / 4.0;
        assert!((kurtosis(&v) - (m4 - 3.0)).abs() < 1e-12);
    }

    #[test]
    fn symmetric_data_has_zero_skew() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&v).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sample_sd_not_below_population_sd(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..=50)
        ) {
            let s = standard_deviation(&data, true);
            let p = standard_deviation(&data, false);
            prop_assert!(s >= p, "sample {s} < population {p}");
        }

        #[test]
        fn q2_equals_median(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=50)
        ) {
            prop_assert_eq!(quartiles(&data).q2, median(&data));
        }

        #[test]
        fn min_mean_max_ordered(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=50)
        ) {
            let m = mean(&data);
            prop_assert!(min(&data) <= m + 1e-9);
            prop_assert!(m <= max(&data) + 1e-9);
        }

        #[test]
        fn describe_is_idempotent(
            data in proptest::collection::vec(-1e3_f64..1e3, 0..=40)
        ) {
            prop_assert_eq!(describe(&data), describe(&data));
        }
    }
}
