//! Analysis configuration.
//!
//! [`AnalysisConfig`] selects the chart, limit width, and rule catalogue for
//! [`analyze`](crate::analysis::analyze). It deserializes from any serde
//! format; omitted fields take their defaults.
//!
//! ```
//! use u_spc::config::AnalysisConfig;
//! use u_spc::spc::{ChartType, RuleSet};
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.chart_type, ChartType::IndividualMR);
//! assert_eq!(config.sigma_level, 3.0);
//! assert_eq!(config.rule_set, RuleSet::Nelson);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spc::constants::MIN_SUBGROUP_SIZE;
use crate::spc::{ChartType, RuleSet, SampleSizes, DEFAULT_SIGMA_LEVEL};

/// Settings for one chart analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Chart family.
    pub chart_type: ChartType,
    /// Control limit width in sigmas.
    pub sigma_level: f64,
    /// Run rules to evaluate.
    pub rule_set: RuleSet,
    /// Subgroup size used to split flat values for X-bar charts.
    pub subgroup_size: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::IndividualMR,
            sigma_level: DEFAULT_SIGMA_LEVEL,
            rule_set: RuleSet::Nelson,
            subgroup_size: None,
        }
    }
}

impl AnalysisConfig {
    /// Configuration for `chart_type` with every other setting at its default.
    pub fn for_chart(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidSigmaLevel`] unless `sigma_level` is finite and positive
    /// - [`ConfigError::InvalidSubgroupSize`] if `subgroup_size` is below 2
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sigma_level.is_finite() || self.sigma_level <= 0.0 {
            return Err(ConfigError::InvalidSigmaLevel(self.sigma_level));
        }
        if let Some(n) = self.subgroup_size {
            if n < MIN_SUBGROUP_SIZE {
                return Err(ConfigError::InvalidSubgroupSize(n));
            }
        }
        Ok(())
    }

    /// Size metadata implied by `subgroup_size`, if set.
    pub fn subgroup_sizes(&self) -> Option<SampleSizes> {
        self.subgroup_size.map(|n| SampleSizes::Constant(n as f64))
    }
}
