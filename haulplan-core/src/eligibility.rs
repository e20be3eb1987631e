//! Optional per-job profit floor applied before selection.

use crate::{Fixed, ProfitSheet};

/// Indices of jobs whose profit reaches `floor`, in job order.
///
/// Jobs below the floor are excluded outright: they cannot appear in any
/// selection even when their capacity would otherwise be idle. Without a
/// floor every job is eligible.
///
/// # Examples
/// ```
/// use haulplan_core::{CostConfig, Fixed, Job, ProfitSheet, eligible_indices};
///
/// let jobs = [
///     Job::new("a", 500.0, 0.0, 0.0, 1.0, 1.0),
///     Job::new("b", 100.0, 0.0, 0.0, 1.0, 1.0),
/// ];
/// let sheet = ProfitSheet::compute(&jobs, &CostConfig::new(8.0, 4.0, 0.0, 0.0)).unwrap();
/// assert_eq!(eligible_indices(&sheet, Fixed::from_f64(300.0)), vec![0]);
/// assert_eq!(eligible_indices(&sheet, None), vec![0, 1]);
/// ```
#[must_use]
pub fn eligible_indices(profits: &ProfitSheet, floor: Option<Fixed>) -> Vec<usize> {
    profits
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, profit)| floor.is_none_or(|min| **profit >= min))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{textbook_config, textbook_jobs};
    use rstest::rstest;

    #[rstest]
    #[case::none(None, vec![0, 1, 2, 3, 4])]
    #[case::boundary_is_kept(Some(505.0), vec![0, 2, 4])]
    #[case::above_all(Some(1_000.0), vec![])]
    fn floor_selects_expected_jobs(#[case] floor: Option<f64>, #[case] expected: Vec<usize>) {
        let sheet = ProfitSheet::compute(&textbook_jobs(), &textbook_config()).expect("priced");
        let quantised = floor.and_then(Fixed::from_f64);
        assert_eq!(eligible_indices(&sheet, quantised), expected);
    }
}
