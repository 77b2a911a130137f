//! Process capability indices (Cp, Cpk, Cpu, Cpl, Pp, Ppk).
//!
//! Capability indices relate the spread of a process to the width of its
//! specification. Sigma is the sample standard deviation of all
//! observations.
//!
//! # Pp / Ppk
//!
//! Short-term (within-subgroup) and long-term (overall) sigma are not
//! distinguished: Pp equals Cp and Ppk equals Cpk.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::{Deserialize, Serialize};

use super::sigma_level::tail_ppm;
use crate::descriptive::{mean, standard_deviation};
use crate::error::SpecError;

/// Specification limits for capability analysis.
///
/// Fields are public and [`process_capability`] accepts whatever they hold;
/// use [`SpecificationLimits::new`] to reject inconsistent limits up front.
///
/// # Examples
///
/// ```
/// use u_spc::capability::SpecificationLimits;
///
/// // Two-sided
/// let spec = SpecificationLimits::new(Some(10.0), Some(5.0)).unwrap();
///
/// // Upper limit only
/// let spec = SpecificationLimits::new(Some(10.0), None).unwrap();
///
/// // Error: no limits
/// assert!(SpecificationLimits::new(None, None).is_err());
///
/// // Error: USL <= LSL
/// assert!(SpecificationLimits::new(Some(5.0), Some(10.0)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecificationLimits {
    /// Upper specification limit.
    pub usl: Option<f64>,
    /// Lower specification limit.
    pub lsl: Option<f64>,
    /// Nominal target value.
    pub target: Option<f64>,
    /// Measurement unit label, carried through for reporting.
    pub unit: Option<String>,
}

impl SpecificationLimits {
    /// Creates validated specification limits.
    ///
    /// # Errors
    ///
    /// - [`SpecError::MissingLimits`] if both limits are `None`
    /// - [`SpecError::NonFinite`] if a limit is NaN or infinite
    /// - [`SpecError::InvertedLimits`] if `usl <= lsl`
    pub fn new(usl: Option<f64>, lsl: Option<f64>) -> Result<Self, SpecError> {
        if usl.is_none() && lsl.is_none() {
            return Err(SpecError::MissingLimits);
        }
        if usl.is_some_and(|u| !u.is_finite()) {
            return Err(SpecError::NonFinite { which: "USL" });
        }
        if lsl.is_some_and(|l| !l.is_finite()) {
            return Err(SpecError::NonFinite { which: "LSL" });
        }
        if let (Some(usl), Some(lsl)) = (usl, lsl) {
            if usl <= lsl {
                return Err(SpecError::InvertedLimits { usl, lsl });
            }
        }
        Ok(Self {
            usl,
            lsl,
            target: None,
            unit: None,
        })
    }

    /// Sets the nominal target.
    ///
    /// # Errors
    ///
    /// [`SpecError::NonFinite`] if `target` is NaN or infinite.
    pub fn with_target(mut self, target: f64) -> Result<Self, SpecError> {
        if !target.is_finite() {
            return Err(SpecError::NonFinite { which: "target" });
        }
        self.target = Some(target);
        Ok(self)
    }

    /// Sets the measurement unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Computed capability indices.
///
/// Indices whose limit is missing are `0.0`. A zero process sigma makes the
/// divisions produce infinities or NaN, which are returned unchanged.
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp/Pp | >= 1.33 | Process is capable |
/// | Cpk/Ppk | >= 1.33 | Process is capable and centered |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessCapability {
    /// (USL - LSL) / 6σ. Requires both limits.
    pub cp: f64,
    /// min(Cpu, Cpl) over the limits present.
    pub cpk: f64,
    /// Same as `cp`.
    pub pp: f64,
    /// Same as `cpk`.
    pub ppk: f64,
    /// (USL - mean) / 3σ. Requires USL.
    pub cpu: f64,
    /// (mean - LSL) / 3σ. Requires LSL.
    pub cpl: f64,
    /// Sigma quality level, |Cpk| · 3.
    pub sigma: f64,
    /// Expected defects per million, one-sided normal tail at `sigma`.
    pub ppm: f64,
}

/// Computes capability indices for `values` against `spec`.
///
/// Without specification limits every index is zero and `ppm` is the tail
/// at sigma level zero (500,000).
///
/// # Examples
///
/// ```
/// use u_spc::capability::{process_capability, SpecificationLimits};
///
/// let spec = SpecificationLimits::new(Some(11.0), Some(9.0)).unwrap();
/// let data = [9.5, 10.0, 10.2, 9.8, 10.1, 10.3, 9.9, 10.0];
/// let pc = process_capability(&data, Some(&spec));
/// assert!(pc.cp > 0.0);
/// assert!(pc.cpk <= pc.cp);
/// assert_eq!(pc.pp, pc.cp);
/// ```
pub fn process_capability(values: &[f64], spec: Option<&SpecificationLimits>) -> ProcessCapability {
    let x_bar = mean(values);
    let sigma = standard_deviation(values, true);
    let (usl, lsl) = spec.map_or((None, None), |s| (s.usl, s.lsl));
    capability_from_moments(x_bar, sigma, usl, lsl)
}

/// Capability indices from a known mean and sigma.
pub fn capability_from_moments(
    x_bar: f64,
    sigma: f64,
    usl: Option<f64>,
    lsl: Option<f64>,
) -> ProcessCapability {
    let cpu = usl.map(|u| (u - x_bar) / (3.0 * sigma));
    let cpl = lsl.map(|l| (x_bar - l) / (3.0 * sigma));
    let cp = match (usl, lsl) {
        (Some(u), Some(l)) => (u - l) / (6.0 * sigma),
        _ => 0.0,
    };
    let cpk = match (cpu, cpl) {
        (Some(u), Some(l)) => u.min(l),
        (Some(u), None) => u,
        (None, Some(l)) => l,
        (None, None) => 0.0,
    };

    let sigma_level = cpk.abs() * 3.0;
    ProcessCapability {
        cp,
        cpk,
        pp: cp,
        ppk: cpk,
        cpu: cpu.unwrap_or(0.0),
        cpl: cpl.unwrap_or(0.0),
        sigma: sigma_level,
        ppm: tail_ppm(sigma_level),
    }
}
