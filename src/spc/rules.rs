//! Run rules for detecting non-random patterns in control charts.
//!
//! Implements Western Electric (4 rules) and Nelson (8 rules) run tests
//! for identifying special causes of variation in a plotted sequence.
//!
//! Zone boundaries are interpolated linearly from the limits, assuming they
//! are symmetric about the center line: `1σ = (UCL - CL) / 3`.
//!
//! # Reporting
//!
//! Every rule scans the whole sequence in index order on every call; rules
//! never suppress one another. How often a rule reports differs:
//!
//! | Rule | Reports |
//! |------|---------|
//! | 1 | every point beyond the limits |
//! | 2, 3 | each completed run; the run counter restarts after reporting |
//! | 4, 7, 8 | the first qualifying window only |
//! | 5, 6 | every qualifying window |
//!
//! Rule 2 counts points, so a new run starts after the reported window.
//! Rule 3 counts steps between points, so the last point of a reported trend
//! is also the first point of the next one and back-to-back trend reports
//! share that point.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use serde::{Deserialize, Serialize};

use super::chart::{ControlLimits, RuleViolation, ViolationType};

/// Trait for applying run rules to chart data.
///
/// Run rules detect non-random patterns that indicate special causes of
/// variation even when individual points remain within control limits.
pub trait RunRule {
    /// Check `values` against this rule set.
    ///
    /// Violations are grouped by rule number, and in index order within a rule.
    fn check(&self, values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation>;
}

/// Western Electric rules (4 rules).
///
/// The original run tests from the Western Electric *Statistical Quality
/// Control Handbook* (1956), corresponding to Nelson rules 1, 2, 5, and 6.
#[derive(Debug, Clone, Copy, Default)]
pub struct WesternElectricRules;

/// Nelson rules (8 rules, superset of Western Electric).
#[derive(Debug, Clone, Copy, Default)]
pub struct NelsonRules;

/// Selects which rule catalogue to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSet {
    /// All eight Nelson rules.
    #[default]
    Nelson,
    /// Nelson rules 1, 2, 5 and 6.
    WesternElectric,
}

impl RuleSet {
    /// The rules this set evaluates, in Nelson order.
    pub fn rules(self) -> &'static [ViolationType] {
        match self {
            RuleSet::Nelson => &ViolationType::ALL,
            RuleSet::WesternElectric => &[
                ViolationType::BeyondLimits,
                ViolationType::NineOneSide,
                ViolationType::TwoOfThreeBeyond2Sigma,
                ViolationType::FourOfFiveBeyond1Sigma,
            ],
        }
    }

    /// Evaluates this rule set over `values`.
    pub fn detect(self, values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
        match self {
            RuleSet::Nelson => NelsonRules.check(values, limits),
            RuleSet::WesternElectric => WesternElectricRules.check(values, limits),
        }
    }
}

/// Runs all eight Nelson rules over `values`.
///
/// # Examples
///
/// ```
/// use u_spc::spc::{detect_violations, ControlLimits, ViolationType};
///
/// let limits = ControlLimits { ucl: 30.0, lcl: 20.0, cl: 25.0, sigma: 5.0 / 3.0 };
/// let violations = detect_violations(&[25.0, 31.0, 25.0], &limits);
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].rule, ViolationType::BeyondLimits);
/// assert_eq!(violations[0].data_point_indices, vec![1]);
/// ```
pub fn detect_violations(values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
    NelsonRules.check(values, limits)
}

/// Evaluates a single rule.
pub fn check_rule(rule: ViolationType, values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
    let zones = Zones::new(limits);
    match rule {
        ViolationType::BeyondLimits => check_rule1(values, limits),
        ViolationType::NineOneSide => check_rule2(values, limits),
        ViolationType::SixTrend => check_rule3(values),
        ViolationType::FourteenAlternating => check_rule4(values),
        ViolationType::TwoOfThreeBeyond2Sigma => check_rule5(values, &zones),
        ViolationType::FourOfFiveBeyond1Sigma => check_rule6(values, &zones),
        ViolationType::FifteenWithin1Sigma => check_rule7(values, &zones),
        ViolationType::EightBeyond1Sigma => check_rule8(values, &zones),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// 1-sigma and 2-sigma zone boundaries around the center line.
#[derive(Debug, Clone, Copy)]
struct Zones {
    one_upper: f64,
    one_lower: f64,
    two_upper: f64,
    two_lower: f64,
}

impl Zones {
    fn new(limits: &ControlLimits) -> Self {
        let sigma = (limits.ucl - limits.cl) / 3.0;
        Self {
            one_upper: limits.cl + sigma,
            one_lower: limits.cl - sigma,
            two_upper: limits.cl + 2.0 * sigma,
            two_lower: limits.cl - 2.0 * sigma,
        }
    }

    fn beyond_two(&self, v: f64) -> bool {
        v > self.two_upper || v < self.two_lower
    }

    fn beyond_one(&self, v: f64) -> bool {
        v > self.one_upper || v < self.one_lower
    }

    fn within_one(&self, v: f64) -> bool {
        v >= self.one_lower && v <= self.one_upper
    }
}

/// +1 above / increasing, -1 below / decreasing, 0 equal.
fn sign(a: f64, b: f64) -> i8 {
    if b > a {
        1
    } else if b < a {
        -1
    } else {
        0
    }
}

fn window(start: usize, len: usize) -> Vec<usize> {
    (start..start + len).collect()
}

/// Nelson Rule 1: Point beyond control limits.
fn check_rule1(values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > limits.ucl || v < limits.lcl)
        .map(|(i, &v)| {
            let side = if v > limits.ucl { "above UCL" } else { "below LCL" };
            RuleViolation::new(
                ViolationType::BeyondLimits,
                vec![i],
                format!(
                    "Point {i} ({v:.4}) is {side} (UCL {:.4}, LCL {:.4})",
                    limits.ucl, limits.lcl
                ),
            )
        })
        .collect()
}

/// Nelson Rule 2: 9 consecutive points on the same side of center line.
///
/// A point exactly on the center line belongs to neither side and breaks
/// the run. After reporting, the counter restarts so the same run is not
/// reported again on every following point.
fn check_rule2(values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
    const RUN: usize = 9;
    let mut violations = Vec::new();
    if values.len() < RUN {
        return violations;
    }

    let mut side = 0_i8;
    let mut run_length = 0_usize;
    for (i, &v) in values.iter().enumerate() {
        let s = sign(limits.cl, v);
        if s == 0 {
            side = 0;
            run_length = 0;
            continue;
        }
        if s == side {
            run_length += 1;
        } else {
            side = s;
            run_length = 1;
        }
        if run_length == RUN {
            let position = if side > 0 { "above" } else { "below" };
            violations.push(RuleViolation::new(
                ViolationType::NineOneSide,
                window(i + 1 - RUN, RUN),
                format!(
                    "9 consecutive points {position} the center line ending at point {i}"
                ),
            ));
            run_length = 0;
        }
    }
    violations
}

/// Nelson Rule 3: 6 consecutive points steadily increasing or decreasing.
///
/// Equal neighbours break the trend. After reporting, the last point of the
/// reported trend starts the next run, so back-to-back reports share one
/// boundary point.
fn check_rule3(values: &[f64]) -> Vec<RuleViolation> {
    const RUN: usize = 6;
    let mut violations = Vec::new();
    if values.len() < RUN {
        return violations;
    }

    let mut direction = 0_i8;
    let mut run_length = 1_usize;
    for i in 1..values.len() {
        let d = sign(values[i - 1], values[i]);
        if d == 0 {
            direction = 0;
            run_length = 1;
            continue;
        }
        if d == direction {
            run_length += 1;
        } else {
            direction = d;
            run_length = 2;
        }
        if run_length == RUN {
            let trend = if direction > 0 { "increasing" } else { "decreasing" };
            violations.push(RuleViolation::new(
                ViolationType::SixTrend,
                window(i + 1 - RUN, RUN),
                format!("6 consecutive points steadily {trend} ending at point {i}"),
            ));
            run_length = 1;
        }
    }
    violations
}

/// Nelson Rule 4: 14 consecutive points alternating up and down.
///
/// Only the first qualifying window is reported.
fn check_rule4(values: &[f64]) -> Vec<RuleViolation> {
    const RUN: usize = 14;
    if values.len() < RUN {
        return Vec::new();
    }

    let dirs: Vec<i8> = values.windows(2).map(|w| sign(w[0], w[1])).collect();
    // dirs[start..start + RUN - 1] are the steps inside the window at `start`
    let first = (0..=values.len() - RUN).find(|&start| {
        dirs[start..start + RUN - 1]
            .windows(2)
            .all(|d| d[0] != 0 && d[1] != 0 && d[0] == -d[1])
    });

    first
        .map(|start| {
            vec![RuleViolation::new(
                ViolationType::FourteenAlternating,
                window(start, RUN),
                format!(
                    "14 consecutive points alternating up and down from point {start} to {}",
                    start + RUN - 1
                ),
            )]
        })
        .unwrap_or_default()
}

/// Nelson Rule 5: 2 out of 3 consecutive points beyond 2 sigma.
///
/// Points beyond either 2-sigma boundary count toward the same window.
/// Every qualifying window is reported.
fn check_rule5(values: &[f64], zones: &Zones) -> Vec<RuleViolation> {
    const RUN: usize = 3;
    values
        .windows(RUN)
        .enumerate()
        .filter(|(_, w)| w.iter().filter(|&&v| zones.beyond_two(v)).count() >= 2)
        .map(|(start, _)| {
            RuleViolation::new(
                ViolationType::TwoOfThreeBeyond2Sigma,
                window(start, RUN),
                format!(
                    "2 of 3 points beyond 2 sigma in points {start} to {}",
                    start + RUN - 1
                ),
            )
        })
        .collect()
}

/// Nelson Rule 6: 4 out of 5 consecutive points beyond 1 sigma.
///
/// Every qualifying window is reported.
fn check_rule6(values: &[f64], zones: &Zones) -> Vec<RuleViolation> {
    const RUN: usize = 5;
    values
        .windows(RUN)
        .enumerate()
        .filter(|(_, w)| w.iter().filter(|&&v| zones.beyond_one(v)).count() >= 4)
        .map(|(start, _)| {
            RuleViolation::new(
                ViolationType::FourOfFiveBeyond1Sigma,
                window(start, RUN),
                format!(
                    "4 of 5 points beyond 1 sigma in points {start} to {}",
                    start + RUN - 1
                ),
            )
        })
        .collect()
}

/// Nelson Rule 7: 15 consecutive points within 1 sigma of center line.
///
/// Boundaries are inclusive. Only the first qualifying window is reported.
fn check_rule7(values: &[f64], zones: &Zones) -> Vec<RuleViolation> {
    const RUN: usize = 15;
    first_window(values, RUN, |v| zones.within_one(v))
        .map(|start| {
            vec![RuleViolation::new(
                ViolationType::FifteenWithin1Sigma,
                window(start, RUN),
                format!(
                    "15 consecutive points within 1 sigma of the center line from point {start} to {}",
                    start + RUN - 1
                ),
            )]
        })
        .unwrap_or_default()
}

/// Nelson Rule 8: 8 consecutive points beyond 1 sigma on either side.
///
/// Only the first qualifying window is reported.
fn check_rule8(values: &[f64], zones: &Zones) -> Vec<RuleViolation> {
    const RUN: usize = 8;
    first_window(values, RUN, |v| zones.beyond_one(v))
        .map(|start| {
            vec![RuleViolation::new(
                ViolationType::EightBeyond1Sigma,
                window(start, RUN),
                format!(
                    "8 consecutive points beyond 1 sigma from point {start} to {}",
                    start + RUN - 1
                ),
            )]
        })
        .unwrap_or_default()
}

/// Start of the first window of `len` points that all satisfy `pred`.
fn first_window(values: &[f64], len: usize, pred: impl Fn(f64) -> bool) -> Option<usize> {
    values
        .windows(len)
        .position(|w| w.iter().all(|&v| pred(v)))
}

// ---------------------------------------------------------------------------
// RunRule implementations
// ---------------------------------------------------------------------------

impl RunRule for WesternElectricRules {
    /// Apply the 4 Western Electric run rules (Nelson 1, 2, 5, 6).
    fn check(&self, values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
        run_rules(RuleSet::WesternElectric.rules(), values, limits)
    }
}

impl RunRule for NelsonRules {
    /// Apply all 8 Nelson run rules.
    fn check(&self, values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
        run_rules(RuleSet::Nelson.rules(), values, limits)
    }
}

fn run_rules(rules: &[ViolationType], values: &[f64], limits: &ControlLimits) -> Vec<RuleViolation> {
    rules
        .iter()
        .flat_map(|&rule| check_rule(rule, values, limits))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn detection_is_idempotent(
            data in proptest::collection::vec(0.0_f64..50.0, 0..=60)
        ) {
            let limits = ControlLimits { ucl: 30.0, lcl: 20.0, cl: 25.0, sigma: 5.0 / 3.0 };
            prop_assert_eq!(detect_violations(&data, &limits), detect_violations(&data, &limits));
        }

        #[test]
        fn indices_in_bounds_and_windows_sized(
            data in proptest::collection::vec(0.0_f64..50.0, 0..=60)
        ) {
            let limits = ControlLimits { ucl: 30.0, lcl: 20.0, cl: 25.0, sigma: 5.0 / 3.0 };
            for v in detect_violations(&data, &limits) {
                prop_assert_eq!(v.data_point_indices.len(), v.rule.window());
                prop_assert!(v.data_point_indices.iter().all(|&i| i < data.len()));
                prop_assert!(v.data_point_indices.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }

        #[test]
        fn western_electric_is_subset_of_nelson(
            data in proptest::collection::vec(0.0_f64..50.0, 0..=60)
        ) {
            let limits = ControlLimits { ucl: 30.0, lcl: 20.0, cl: 25.0, sigma: 5.0 / 3.0 };
            let nelson = NelsonRules.check(&data, &limits);
            for v in WesternElectricRules.check(&data, &limits) {
                prop_assert!(nelson.contains(&v));
            }
        }
    }
}
