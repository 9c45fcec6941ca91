//! Descriptive statistics over resolution times

use crate::models::summary::ResolutionStats;

/// Min, median and max of `values`.
///
/// An empty slice yields all zeros. Sorting happens on a private copy.
pub fn summarize(values: &[f64]) -> ResolutionStats {
    if values.is_empty() {
        return ResolutionStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    ResolutionStats {
        min: sorted[0],
        median,
        max: sorted[n - 1],
    }
}
