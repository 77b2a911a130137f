//! Statistical Process Control (SPC) charts.
//!
//! Control limits for variables and attributes data, the factor tables they
//! rely on, and run rules that flag out-of-control patterns.
//!
//! # Variables Charts
//!
//! - [`xbar_r_limits`] — X-bar and Range chart for subgroup data
//! - [`xbar_s_limits`] — X-bar and Standard Deviation chart for subgroup data
//! - [`individuals_limits`] — Individual and Moving Range chart
//!
//! # Attributes Charts
//!
//! - [`p_limits`] — Proportion nonconforming
//! - [`np_limits`] — Count of nonconforming items (constant sample size)
//! - [`c_limits`] — Count of defects
//! - [`u_limits`] — Defects per unit
//!
//! [`control_limits`] dispatches on [`ChartType`].
//!
//! # Run Rules
//!
//! - [`detect_violations`] / [`NelsonRules`] — 8 rules
//! - [`WesternElectricRules`] — 4 classic run rules
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod attributes;
mod chart;
pub mod constants;
mod limits;
mod rules;
mod variables;

pub use attributes::{c_limits, np_limits, p_limits, proportions, u_limits};
pub use chart::{
    ChartData, ChartType, ControlLimits, RuleViolation, SampleSizes, Severity, ViolationType,
};
pub use constants::ControlConstants;
pub use limits::{control_limits, plotted_values, DEFAULT_SIGMA_LEVEL};
pub use rules::{
    check_rule, detect_violations, NelsonRules, RuleSet, RunRule, WesternElectricRules,
};
pub use variables::{
    individuals_limits, moving_ranges, subgroup_means, xbar_r_limits, xbar_s_limits,
};
