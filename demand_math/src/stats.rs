//! Summary statistics over demand values
//!
//! Thin wrappers over `statrs` that return `0.0` instead of `NaN` for empty
//! input, since every caller treats "no data" as "no demand".

use statrs::statistics::Statistics;

/// Arithmetic mean, or 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.mean()
}

/// Population standard deviation, or 0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let std_dev = values.population_std_dev();
    if std_dev.is_finite() {
        std_dev
    } else {
        0.0
    }
}

/// Mean of the values whose position falls in each of `slots` buckets.
///
/// Position `i` belongs to bucket `i % slots`. Empty buckets are `None`.
pub fn slot_means(values: &[f64], slots: usize) -> Vec<Option<f64>> {
    if slots == 0 {
        return Vec::new();
    }

    let mut sums = vec![0.0; slots];
    let mut counts = vec![0usize; slots];
    for (idx, value) in values.iter().enumerate() {
        sums[idx % slots] += value;
        counts[idx % slots] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect()
}
