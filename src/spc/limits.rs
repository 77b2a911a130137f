//! Chart-type dispatch for the limit calculators.
//!
//! [`control_limits`] routes a [`ChartType`] and its input to the matching
//! calculator in [`variables`](super::variables) or
//! [`attributes`](super::attributes), reshaping the input where the chart
//! expects a different layout. [`plotted_values`] yields the series each
//! chart plots, which is what the run rules scan.

use tracing::debug;

use super::attributes::{c_limits, np_limits, p_limits, proportions, u_limits};
use super::chart::{ChartData, ChartType, ControlLimits, SampleSizes};
use super::variables::{individuals_limits, subgroup_means, xbar_r_limits, xbar_s_limits};

/// Default limit width in sigmas.
pub const DEFAULT_SIGMA_LEVEL: f64 = 3.0;

/// Computes control limits for `chart`.
///
/// # Input layout
///
/// - X-bar-R / X-bar-S take [`ChartData::Subgroups`], or flat
///   [`ChartData::Values`] with `SampleSizes::Constant(n)`, chunked into
///   complete subgroups of `n` (a trailing partial subgroup is dropped).
/// - I-MR and C take the flat sequence; subgroups are flattened.
/// - P takes defect counts plus sample sizes, NP takes defect counts plus a
///   constant sample size (a per-sample list is averaged), U takes defect
///   rates plus sample sizes.
///
/// Missing size metadata for P/NP/U, or any other incompatible input, yields
/// [`ControlLimits::zero`]. Matching chart type to data is the caller's job.
///
/// # Examples
///
/// ```
/// use u_spc::spc::{control_limits, ChartData, ChartType, SampleSizes};
///
/// let data = ChartData::Values(vec![3.0, 5.0, 4.0, 6.0]);
/// let c = control_limits(ChartType::C, &data, 3.0, None);
/// assert_eq!(c.cl, 4.5);
///
/// let np = control_limits(ChartType::NP, &data, 3.0, Some(&SampleSizes::Constant(50.0)));
/// assert_eq!(np.cl, 4.5);
/// ```
pub fn control_limits(
    chart: ChartType,
    data: &ChartData,
    sigma_level: f64,
    sizes: Option<&SampleSizes>,
) -> ControlLimits {
    match chart {
        ChartType::XBarR => match subgroups_of(data, sizes) {
            Some(groups) => xbar_r_limits(&groups, sigma_level),
            None => ControlLimits::zero(),
        },
        ChartType::XBarS => match subgroups_of(data, sizes) {
            Some(groups) => xbar_s_limits(&groups, sigma_level),
            None => ControlLimits::zero(),
        },
        ChartType::IndividualMR => individuals_limits(&data.flatten(), sigma_level),
        ChartType::C => c_limits(&data.flatten(), sigma_level),
        ChartType::P => {
            let values = data.flatten();
            match sizes {
                Some(s) => p_limits(&values, &s.per_sample(values.len()), sigma_level),
                None => missing_sizes(chart),
            }
        }
        ChartType::NP => match sizes {
            Some(s) => np_limits(&data.flatten(), s.average(), sigma_level),
            None => missing_sizes(chart),
        },
        ChartType::U => {
            let values = data.flatten();
            match sizes {
                Some(s) => u_limits(&values, &s.per_sample(values.len()), sigma_level),
                None => missing_sizes(chart),
            }
        }
    }
}

/// The series a chart of type `chart` plots.
///
/// Subgroup means for X-bar charts, proportions for P charts (empty when
/// sizes are missing), and the raw sequence otherwise.
pub fn plotted_values(chart: ChartType, data: &ChartData, sizes: Option<&SampleSizes>) -> Vec<f64> {
    match chart {
        ChartType::XBarR | ChartType::XBarS => subgroups_of(data, sizes)
            .map(|groups| subgroup_means(&groups))
            .unwrap_or_default(),
        ChartType::P => {
            let values = data.flatten();
            sizes
                .map(|s| proportions(&values, &s.per_sample(values.len())))
                .unwrap_or_default()
        }
        ChartType::IndividualMR | ChartType::NP | ChartType::C | ChartType::U => data.flatten(),
    }
}

/// Subgroups for X-bar charts, chunking flat values by a constant size.
fn subgroups_of(data: &ChartData, sizes: Option<&SampleSizes>) -> Option<Vec<Vec<f64>>> {
    match (data, sizes) {
        (ChartData::Subgroups(groups), _) => Some(groups.clone()),
        (ChartData::Values(values), Some(SampleSizes::Constant(n))) if *n >= 1.0 => {
            let n = *n as usize;
            Some(values.chunks_exact(n).map(<[f64]>::to_vec).collect())
        }
        (ChartData::Values(values), _) => {
            debug!(
                points = values.len(),
                "flat values for a subgroup chart need a constant subgroup size"
            );
            None
        }
    }
}

fn missing_sizes(chart: ChartType) -> ControlLimits {
    debug!(%chart, "sample sizes required, returning zero limits");
    ControlLimits::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Vec<f64>> {
        vec![
            vec![10.0, 12.0, 11.0],
            vec![11.0, 13.0, 12.0],
            vec![9.0, 11.0, 10.0],
        ]
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let data = ChartData::Subgroups(groups());
        assert_eq!(
            control_limits(ChartType::XBarR, &data, 3.0, None),
            xbar_r_limits(&groups(), 3.0)
        );
        assert_eq!(
            control_limits(ChartType::XBarS, &data, 2.0, None),
            xbar_s_limits(&groups(), 2.0)
        );
    }

    #[test]
    fn test_flat_values_chunked_into_subgroups() {
        let flat = ChartData::Values(groups().concat());
        let sizes = SampleSizes::Constant(3.0);
        assert_eq!(
            control_limits(ChartType::XBarR, &flat, 3.0, Some(&sizes)),
            xbar_r_limits(&groups(), 3.0)
        );
    }

    #[test]
    fn test_partial_trailing_subgroup_dropped() {
        let mut values = groups().concat();
        values.push(100.0);
        let flat = ChartData::Values(values);
        let sizes = SampleSizes::Constant(3.0);
        assert_eq!(
            control_limits(ChartType::XBarR, &flat, 3.0, Some(&sizes)),
            xbar_r_limits(&groups(), 3.0)
        );
    }

    #[test]
    fn test_flat_values_without_size_give_zero_for_subgroup_charts() {
        let flat = ChartData::Values(groups().concat());
        assert!(control_limits(ChartType::XBarR, &flat, 3.0, None).is_zero());
        assert!(control_limits(ChartType::XBarS, &flat, 3.0, None).is_zero());
    }

    #[test]
    fn test_individuals_flatten_subgroups() {
        let data = ChartData::Subgroups(groups());
        assert_eq!(
            control_limits(ChartType::IndividualMR, &data, 3.0, None),
            individuals_limits(&groups().concat(), 3.0)
        );
    }

    #[test]
    fn test_attribute_charts_require_sizes() {
        let data = ChartData::Values(vec![1.0, 2.0, 3.0]);
        for chart in [ChartType::P, ChartType::NP, ChartType::U] {
            assert!(control_limits(chart, &data, 3.0, None).is_zero(), "{chart}");
        }
        assert!(!control_limits(ChartType::C, &data, 3.0, None).is_zero());
    }

    #[test]
    fn test_p_with_constant_size() {
        let data = ChartData::Values(vec![2.0, 4.0]);
        let limits = control_limits(ChartType::P, &data, 3.0, Some(&SampleSizes::Constant(100.0)));
        assert_eq!(limits, p_limits(&[2.0, 4.0], &[100.0, 100.0], 3.0));
    }

    #[test]
    fn test_np_averages_per_sample_sizes() {
        let data = ChartData::Values(vec![2.0, 4.0]);
        let sizes = SampleSizes::PerSample(vec![40.0, 60.0]);
        assert_eq!(
            control_limits(ChartType::NP, &data, 3.0, Some(&sizes)),
            np_limits(&[2.0, 4.0], 50.0, 3.0)
        );
    }

    #[test]
    fn test_plotted_values() {
        let data = ChartData::Subgroups(groups());
        assert_eq!(
            plotted_values(ChartType::XBarR, &data, None),
            vec![11.0, 12.0, 10.0]
        );
        let counts = ChartData::Values(vec![5.0, 10.0]);
        assert_eq!(
            plotted_values(ChartType::P, &counts, Some(&SampleSizes::Constant(50.0))),
            vec![0.1, 0.2]
        );
        assert!(plotted_values(ChartType::P, &counts, None).is_empty());
        assert_eq!(plotted_values(ChartType::C, &counts, None), vec![5.0, 10.0]);
    }
}
