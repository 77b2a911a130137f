//! Error types for caller-side validation.
//!
//! The computation functions never fail: degenerate input yields zero-valued
//! results. These errors are produced only by the validating constructors
//! ([`SpecificationLimits::new`](crate::capability::SpecificationLimits::new),
//! [`AnalysisConfig::validate`](crate::config::AnalysisConfig::validate)) and
//! by parsing a [`ChartType`](crate::spc::ChartType) from text.

use thiserror::Error;

/// Invalid specification limits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// Neither USL nor LSL was given.
    #[error("at least one specification limit (USL or LSL) is required")]
    MissingLimits,

    /// A limit or the target is NaN or infinite.
    #[error("{which} must be finite")]
    NonFinite {
        /// Which value was rejected (`"USL"`, `"LSL"`, or `"target"`).
        which: &'static str,
    },

    /// `usl <= lsl` with both limits present.
    #[error("USL ({usl}) must be greater than LSL ({lsl})")]
    InvertedLimits {
        /// Upper specification limit.
        usl: f64,
        /// Lower specification limit.
        lsl: f64,
    },
}

/// Invalid analysis configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Sigma level is not a finite positive number.
    #[error("sigma level must be finite and > 0, got {0}")]
    InvalidSigmaLevel(f64),

    /// Chart type name not recognised.
    #[error("unknown chart type: {0:?}")]
    UnknownChartType(String),

    /// Subgroup size below 2.
    #[error("subgroup size must be >= 2, got {0}")]
    InvalidSubgroupSize(usize),
}
