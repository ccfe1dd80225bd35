//! Batch-relative min-max normalization.

use crate::EPSILON;

/// Rescale one signal column to `[0, 100]` using min-max normalization.
///
/// Normalization is batch-relative: a product's normalized score depends on
/// which other products are in the same cycle, not on historical values.
/// When the column is degenerate (all values equal within [`EPSILON`]) the
/// epsilon-guarded formula collapses to `0.0` for every value instead of
/// producing NaN or infinity.
#[must_use]
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range < EPSILON {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / range * 100.0).collect()
}
