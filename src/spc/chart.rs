//! Core control chart types.
//!
//! Defines the building blocks shared by every chart family: the chart type
//! selector, the input shapes, computed control limits, and the violation
//! records produced by the run rules.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Control limits for a chart.
///
/// `ucl >= cl >= lcl` holds for well-formed input but is not enforced;
/// attribute charts clamp `lcl` to zero, and zero-variation data collapses
/// all three lines onto the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Lower control limit.
    pub lcl: f64,
    /// Center line.
    pub cl: f64,
    /// Estimated process standard deviation behind the limits.
    pub sigma: f64,
}

impl ControlLimits {
    /// All-zero limits, returned for empty or insufficient input.
    pub const fn zero() -> Self {
        Self {
            ucl: 0.0,
            lcl: 0.0,
            cl: 0.0,
            sigma: 0.0,
        }
    }

    /// Whether these are the degenerate all-zero limits.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// The seven supported chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    /// X-bar and Range.
    #[serde(rename = "xbar-r")]
    XBarR,
    /// X-bar and Standard Deviation.
    #[serde(rename = "xbar-s")]
    XBarS,
    /// Individuals and Moving Range.
    #[serde(rename = "i-mr")]
    IndividualMR,
    /// Proportion nonconforming.
    #[serde(rename = "p")]
    P,
    /// Count of nonconforming items, constant sample size.
    #[serde(rename = "np")]
    NP,
    /// Count of defects.
    #[serde(rename = "c")]
    C,
    /// Defects per unit.
    #[serde(rename = "u")]
    U,
}

impl ChartType {
    /// All chart types in declaration order.
    pub const ALL: [ChartType; 7] = [
        ChartType::XBarR,
        ChartType::XBarS,
        ChartType::IndividualMR,
        ChartType::P,
        ChartType::NP,
        ChartType::C,
        ChartType::U,
    ];

    /// Short identifier, also used by serde and [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::XBarR => "xbar-r",
            ChartType::XBarS => "xbar-s",
            ChartType::IndividualMR => "i-mr",
            ChartType::P => "p",
            ChartType::NP => "np",
            ChartType::C => "c",
            ChartType::U => "u",
        }
    }

    /// Whether the chart is built from rational subgroups (X-bar-R, X-bar-S).
    pub fn uses_subgroups(self) -> bool {
        matches!(self, ChartType::XBarR | ChartType::XBarS)
    }

    /// Whether the chart needs sample-size metadata (p, np, u).
    pub fn needs_sample_sizes(self) -> bool {
        matches!(self, ChartType::P | ChartType::NP | ChartType::U)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ChartType::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ConfigError::UnknownChartType(s.to_string()))
    }
}

/// Observations handed to the limit calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    /// Rational subgroups, one inner vector per subgroup.
    Subgroups(Vec<Vec<f64>>),
    /// A flat sequence: individual measurements, defect counts, or rates.
    Values(Vec<f64>),
}

impl ChartData {
    /// All observations in sequence order.
    pub fn flatten(&self) -> Vec<f64> {
        match self {
            ChartData::Subgroups(groups) => groups.iter().flatten().copied().collect(),
            ChartData::Values(values) => values.clone(),
        }
    }

    /// Whether there are no observations at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Subgroups(groups) => groups.iter().all(Vec::is_empty),
            ChartData::Values(values) => values.is_empty(),
        }
    }
}

/// Sample-size metadata for attribute charts and flat subgroup input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SampleSizes {
    /// Every sample has the same size.
    Constant(f64),
    /// One size per sample, aligned with the values.
    PerSample(Vec<f64>),
}

impl SampleSizes {
    /// Expands to one size per sample for `len` samples.
    pub fn per_sample(&self, len: usize) -> Vec<f64> {
        match self {
            SampleSizes::Constant(n) => vec![*n; len],
            SampleSizes::PerSample(sizes) => sizes.clone(),
        }
    }

    /// Average sample size; `0.0` when there are no sizes.
    pub fn average(&self) -> f64 {
        match self {
            SampleSizes::Constant(n) => *n,
            SampleSizes::PerSample(sizes) => crate::descriptive::mean(sizes),
        }
    }
}

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Point outside the control limits.
    Error,
    /// Non-random pattern inside the limits.
    Warning,
}

/// Types of control chart violations based on Nelson's eight rules.
///
/// # Reference
///
/// Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
/// *Journal of Quality Technology* 16(4), pp. 237-239.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Point beyond control limits (Nelson Rule 1).
    BeyondLimits,

    /// 9 points in a row on same side of center line (Nelson Rule 2).
    ///
    /// Indicates a sustained shift in the process mean.
    NineOneSide,

    /// 6 points in a row steadily increasing or decreasing (Nelson Rule 3).
    SixTrend,

    /// 14 points in a row alternating up and down (Nelson Rule 4).
    ///
    /// Indicates systematic variation (e.g., two alternating streams).
    FourteenAlternating,

    /// 2 out of 3 points beyond 2 sigma (Nelson Rule 5).
    TwoOfThreeBeyond2Sigma,

    /// 4 out of 5 points beyond 1 sigma (Nelson Rule 6).
    FourOfFiveBeyond1Sigma,

    /// 15 points in a row within 1 sigma of center line (Nelson Rule 7).
    ///
    /// Indicates stratification.
    FifteenWithin1Sigma,

    /// 8 points in a row beyond 1 sigma on either side (Nelson Rule 8).
    ///
    /// Indicates a mixture pattern.
    EightBeyond1Sigma,
}

impl ViolationType {
    /// All rules in Nelson order.
    pub const ALL: [ViolationType; 8] = [
        ViolationType::BeyondLimits,
        ViolationType::NineOneSide,
        ViolationType::SixTrend,
        ViolationType::FourteenAlternating,
        ViolationType::TwoOfThreeBeyond2Sigma,
        ViolationType::FourOfFiveBeyond1Sigma,
        ViolationType::FifteenWithin1Sigma,
        ViolationType::EightBeyond1Sigma,
    ];

    /// Nelson rule number, 1..=8.
    pub fn rule_id(self) -> u8 {
        match self {
            ViolationType::BeyondLimits => 1,
            ViolationType::NineOneSide => 2,
            ViolationType::SixTrend => 3,
            ViolationType::FourteenAlternating => 4,
            ViolationType::TwoOfThreeBeyond2Sigma => 5,
            ViolationType::FourOfFiveBeyond1Sigma => 6,
            ViolationType::FifteenWithin1Sigma => 7,
            ViolationType::EightBeyond1Sigma => 8,
        }
    }

    /// Rule 1 is an error; every pattern rule is a warning.
    pub fn severity(self) -> Severity {
        match self {
            ViolationType::BeyondLimits => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Number of consecutive points the rule inspects.
    pub fn window(self) -> usize {
        match self {
            ViolationType::BeyondLimits => 1,
            ViolationType::NineOneSide => 9,
            ViolationType::SixTrend => 6,
            ViolationType::FourteenAlternating => 14,
            ViolationType::TwoOfThreeBeyond2Sigma => 3,
            ViolationType::FourOfFiveBeyond1Sigma => 5,
            ViolationType::FifteenWithin1Sigma => 15,
            ViolationType::EightBeyond1Sigma => 8,
        }
    }
}

/// One detected anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Stable identifier: `rule{n}-{first}-{last}`.
    pub id: String,
    /// Which rule fired.
    pub rule: ViolationType,
    /// Error for rule 1, warning otherwise.
    pub severity: Severity,
    /// Zero-based indices of the points the violation covers.
    pub data_point_indices: Vec<usize>,
    /// Human-readable explanation.
    pub description: String,
    /// When the violation was recorded. The detector leaves this empty;
    /// callers persisting violations stamp them with [`RuleViolation::stamped`].
    pub timestamp: Option<DateTime<Utc>>,
}

impl RuleViolation {
    /// Builds a violation covering `indices` (must be non-empty).
    pub(crate) fn new(rule: ViolationType, indices: Vec<usize>, description: String) -> Self {
        let first = indices.first().copied().unwrap_or_default();
        let last = indices.last().copied().unwrap_or_default();
        Self {
            id: format!("rule{}-{first}-{last}", rule.rule_id()),
            rule,
            severity: rule.severity(),
            data_point_indices: indices,
            description,
            timestamp: None,
        }
    }

    /// Nelson rule number, 1..=8.
    pub fn rule_id(&self) -> u8 {
        self.rule.rule_id()
    }

    /// Returns this violation with `timestamp` set to `at`.
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }
}
