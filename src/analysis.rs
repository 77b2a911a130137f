//! One-call chart analysis.
//!
//! [`analyze`] runs the full pipeline for one chart: descriptive statistics
//! of the raw observations, control limits for the configured chart, run
//! rules over the plotted series, and capability against optional
//! specification limits. Each call builds its report from scratch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::{process_capability, ProcessCapability, SpecificationLimits};
use crate::config::AnalysisConfig;
use crate::descriptive::{describe, DescriptiveSummary};
use crate::spc::{
    control_limits, plotted_values, ChartData, ChartType, ControlLimits, RuleViolation,
    SampleSizes, Severity, ViolationType,
};

/// Everything computed for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpcReport {
    /// Chart the report was built for.
    pub chart_type: ChartType,
    /// Statistics of the raw observations (subgroups flattened).
    pub summary: DescriptiveSummary,
    /// Control limits of the plotted series.
    pub limits: ControlLimits,
    /// The plotted series the run rules were evaluated on.
    pub points: Vec<f64>,
    /// Capability of the raw observations.
    pub capability: ProcessCapability,
    /// Run-rule violations, grouped by rule.
    pub violations: Vec<RuleViolation>,
}

impl SpcReport {
    /// No rule fired.
    pub fn is_in_control(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one rule.
    pub fn violations_of(&self, rule: ViolationType) -> impl Iterator<Item = &RuleViolation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Number of violations with the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

/// Analyzes `data` as configured.
///
/// `sizes` supplies sample sizes for P/NP/U charts, or a constant subgroup
/// size for flat X-bar input; when `None`, `config.subgroup_size` is used.
/// The configuration is used as given; call
/// [`AnalysisConfig::validate`] first to reject bad settings.
///
/// # Examples
///
/// ```
/// use u_spc::analysis::analyze;
/// use u_spc::config::AnalysisConfig;
/// use u_spc::spc::{ChartData, ChartType};
///
/// let config = AnalysisConfig::for_chart(ChartType::IndividualMR);
/// let data = ChartData::Values(vec![10.0, 10.4, 9.8, 10.1, 9.9, 10.2, 10.0, 9.7]);
/// let report = analyze(&config, &data, None, None);
/// assert_eq!(report.points.len(), 8);
/// assert!(report.limits.ucl > report.limits.cl);
/// assert!(report.is_in_control());
/// ```
pub fn analyze(
    config: &AnalysisConfig,
    data: &ChartData,
    sizes: Option<&SampleSizes>,
    spec: Option<&SpecificationLimits>,
) -> SpcReport {
    let fallback = config.subgroup_sizes();
    let sizes = sizes.or(fallback.as_ref());

    let observations = data.flatten();
    let points = plotted_values(config.chart_type, data, sizes);
    let limits = control_limits(config.chart_type, data, config.sigma_level, sizes);
    let violations = config.rule_set.detect(&points, &limits);
    let capability = process_capability(&observations, spec);

    debug!(
        chart = %config.chart_type,
        observations = observations.len(),
        points = points.len(),
        violations = violations.len(),
        "spc analysis complete"
    );

    SpcReport {
        chart_type: config.chart_type,
        summary: describe(&observations),
        limits,
        points,
        capability,
        violations,
    }
}
