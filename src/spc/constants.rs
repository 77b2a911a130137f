//! Control chart bias-correction factors.
//!
//! A2, A3, d2 and c4 for subgroup sizes n = 2..=25, sourced from ASTM E2587
//! (Standard Practice for Use of Control Charts in Statistical Process
//! Control). Sizes above 25 reuse the n = 25 row; no asymptotic formula is
//! applied, so limits for large subgroups stay identical to those already
//! published by downstream reports.

use serde::{Deserialize, Serialize};

/// Smallest subgroup size in the tables.
pub const MIN_SUBGROUP_SIZE: usize = 2;

/// Largest subgroup size in the tables; larger sizes use this row.
pub const MAX_SUBGROUP_SIZE: usize = 25;

// Index 0 corresponds to n=2.

/// A2 factors for X-bar-R chart limits: CL ± A2 · R-bar.
const A2: [f64; 24] = [
    1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308, 0.285, 0.266, 0.249, 0.235,
    0.223, 0.212, 0.203, 0.194, 0.187, 0.180, 0.173, 0.167, 0.162, 0.157, 0.153,
];

/// A3 factors for X-bar-S chart limits: CL ± A3 · S-bar.
const A3: [f64; 24] = [
    2.659, 1.954, 1.628, 1.427, 1.287, 1.182, 1.099, 1.032, 0.975, 0.927, 0.886, 0.850, 0.817,
    0.789, 0.763, 0.739, 0.718, 0.698, 0.680, 0.663, 0.647, 0.633, 0.619, 0.606,
];

/// d2 factors (mean of the relative range): sigma-hat = R-bar / d2.
const D2: [f64; 24] = [
    1.128, 1.693, 2.059, 2.326, 2.534, 2.704, 2.847, 2.970, 3.078, 3.173, 3.258, 3.336, 3.407,
    3.472, 3.532, 3.588, 3.640, 3.689, 3.735, 3.778, 3.819, 3.858, 3.895, 3.931,
];

/// c4 factors for unbiased sigma from S-bar: sigma-hat = S-bar / c4.
const C4: [f64; 24] = [
    0.7979, 0.8862, 0.9213, 0.9400, 0.9515, 0.9594, 0.9650, 0.9693, 0.9727, 0.9754, 0.9776,
    0.9794, 0.9810, 0.9823, 0.9835, 0.9845, 0.9854, 0.9862, 0.9869, 0.9876, 0.9882, 0.9887,
    0.9892, 0.9896,
];

/// One row of the factor table.
///
/// # Examples
///
/// ```
/// use u_spc::spc::ControlConstants;
///
/// let k = ControlConstants::for_subgroup_size(5).unwrap();
/// assert_eq!(k.a2, 0.577);
/// assert_eq!(k.d2, 2.326);
///
/// // Beyond the table, the n = 25 row is reused.
/// assert_eq!(ControlConstants::for_subgroup_size(40), ControlConstants::for_subgroup_size(25));
/// assert!(ControlConstants::for_subgroup_size(1).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlConstants {
    /// Subgroup size this row was looked up for (after clamping to 25).
    pub n: usize,
    /// X-bar-R limit factor.
    pub a2: f64,
    /// X-bar-S limit factor.
    pub a3: f64,
    /// Range-to-sigma divisor.
    pub d2: f64,
    /// Standard-deviation bias correction.
    pub c4: f64,
}

impl ControlConstants {
    /// Looks up the factors for subgroup size `n`.
    ///
    /// Returns `None` for `n < 2`. Sizes above 25 return the n = 25 row.
    pub fn for_subgroup_size(n: usize) -> Option<Self> {
        let idx = table_index(n)?;
        Some(Self {
            n: idx + MIN_SUBGROUP_SIZE,
            a2: A2[idx],
            a3: A3[idx],
            d2: D2[idx],
            c4: C4[idx],
        })
    }
}

/// A2 factor for subgroup size `n`, or `None` for `n < 2`.
pub fn a2(n: usize) -> Option<f64> {
    table_index(n).map(|i| A2[i])
}

/// A3 factor for subgroup size `n`, or `None` for `n < 2`.
pub fn a3(n: usize) -> Option<f64> {
    table_index(n).map(|i| A3[i])
}

/// d2 factor for subgroup size `n`, or `None` for `n < 2`.
pub fn d2(n: usize) -> Option<f64> {
    table_index(n).map(|i| D2[i])
}

/// c4 factor for subgroup size `n`, or `None` for `n < 2`.
pub fn c4(n: usize) -> Option<f64> {
    table_index(n).map(|i| C4[i])
}

fn table_index(n: usize) -> Option<usize> {
    if n < MIN_SUBGROUP_SIZE {
        return None;
    }
    Some(n.min(MAX_SUBGROUP_SIZE) - MIN_SUBGROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_table_is_none() {
        assert!(ControlConstants::for_subgroup_size(0).is_none());
        assert!(ControlConstants::for_subgroup_size(1).is_none());
        assert!(d2(1).is_none());
    }

    #[test]
    fn table_edges() {
        let low = ControlConstants::for_subgroup_size(2).expect("n=2 in table");
        assert_eq!(low.n, 2);
        assert_eq!(low.a2, 1.880);
        assert_eq!(low.a3, 2.659);
        assert_eq!(low.d2, 1.128);
        assert_eq!(low.c4, 0.7979);

        let high = ControlConstants::for_subgroup_size(25).expect("n=25 in table");
        assert_eq!(high.n, 25);
        assert_eq!(high.a2, 0.153);
        assert_eq!(high.a3, 0.606);
        assert_eq!(high.d2, 3.931);
        assert_eq!(high.c4, 0.9896);
    }

    #[test]
    fn oversize_falls_back_to_25() {
        for n in [26, 50, 1000] {
            assert_eq!(
                ControlConstants::for_subgroup_size(n),
                ControlConstants::for_subgroup_size(25)
            );
        }
    }

    #[test]
    fn textbook_rows() {
        assert_eq!(a2(5), Some(0.577));
        assert_eq!(d2(5), Some(2.326));
        assert_eq!(a3(10), Some(0.975));
        assert_eq!(c4(10), Some(0.9727));
        assert_eq!(a2(20), Some(0.180));
        assert_eq!(d2(20), Some(3.735));
    }

    #[test]
    fn factors_are_monotone() {
        for i in 1..24 {
            assert!(A2[i] < A2[i - 1], "A2 not decreasing at index {i}");
            assert!(A3[i] < A3[i - 1], "A3 not decreasing at index {i}");
            assert!(D2[i] > D2[i - 1], "d2 not increasing at index {i}");
            assert!(C4[i] > C4[i - 1], "c4 not increasing at index {i}");
        }
    }

    #[test]
    fn a3_consistent_with_c4() {
        // A3 = 3 / (c4 * sqrt(n)), to table precision
        for n in 2..=25 {
            let expected = 3.0 / (c4(n).unwrap() * (n as f64).sqrt());
            assert!(
                (a3(n).unwrap() - expected).abs() < 2e-3,
                "n={n}: A3={} expected≈{expected}",
                a3(n).unwrap()
            );
        }
    }
}
