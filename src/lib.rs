//! # u-spc
//!
//! Statistical process control (SPC) engine: descriptive statistics,
//! control limits, process capability, and run-rule violation detection.
//!
//! The engine is domain-agnostic and batch-oriented. It operates on raw
//! `f64` sequences, performs no I/O, and keeps no state between calls, so
//! any number of charts can be analyzed concurrently.
//!
//! ## Modules
//!
//! - [`descriptive`] — Mean, median, mode, variance, quartiles, skewness, kurtosis
//! - [`spc`] — Control limits (X̄-R, X̄-S, I-MR, P, NP, C, U) and Nelson run rules
//! - [`capability`] — Process capability indices (Cp, Cpk, Pp, Ppk) and PPM
//! - [`analysis`] — One-call pipeline producing an [`SpcReport`](analysis::SpcReport)
//! - [`config`] — Serde-backed analysis configuration
//! - [`error`] — Validation errors for caller-side checks
//!
//! ## Degenerate input
//!
//! Empty or too-short input produces zero-valued statistics, all-zero limits,
//! and empty violation lists instead of errors. Arithmetic that yields NaN or
//! infinity (for example a zero standard deviation in a capability index) is
//! returned unchanged for the caller to handle.
//!
//! ## Example
//!
//! ```
//! use u_spc::capability::{process_capability, SpecificationLimits};
//! use u_spc::descriptive::describe;
//! use u_spc::spc::{control_limits, detect_violations, ChartData, ChartType};
//!
//! let values = vec![10.1, 9.9, 10.0, 10.2, 9.8, 10.1, 10.0, 9.9];
//! let summary = describe(&values);
//! let limits = control_limits(ChartType::IndividualMR, &ChartData::Values(values.clone()), 3.0, None);
//! let violations = detect_violations(&values, &limits);
//! let spec = SpecificationLimits::new(Some(10.6), Some(9.4)).unwrap();
//! let capability = process_capability(&values, Some(&spec));
//!
//! assert_eq!(summary.count, 8);
//! assert!(violations.is_empty());
//! assert!(capability.cpk > 1.0);
//! ```

pub mod analysis;
pub mod capability;
pub mod config;
pub mod descriptive;
pub mod error;
pub mod spc;
