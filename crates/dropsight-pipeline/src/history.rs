//! Period-over-period history analysis.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use dropsight_db::SnapshotRow;

/// The product with the largest trend-score increase between the two most
/// recent snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopGainer {
    pub product: String,
    pub delta: f64,
}

/// Compute the top gainer from persisted history.
///
/// Partitions the rows by snapshot time; with fewer than two distinct times
/// there is no delta yet and the result is `None`, a valid "no data yet"
/// outcome rather than an error. Only products present in both of the two most
/// recent snapshots are compared. Equal deltas are broken deterministically
/// by product name ascending.
#[must_use]
pub fn compute_top_gainer(history: &[SnapshotRow]) -> Option<TopGainer> {
    let mut times: Vec<DateTime<Utc>> = history.iter().map(|row| row.time).collect();
    times.sort_unstable();
    times.dedup();

    if times.len() < 2 {
        return None;
    }

    let last_time = times[times.len() - 1];
    let prev_time = times[times.len() - 2];

    let last_scores = scores_at(history, last_time);
    let prev_scores = scores_at(history, prev_time);

    let mut shared: Vec<&str> = last_scores
        .keys()
        .filter(|product| prev_scores.contains_key(*product))
        .copied()
        .collect();
    shared.sort_unstable();

    let mut best: Option<TopGainer> = None;
    for product in shared {
        let delta = last_scores[product] - prev_scores[product];
        // Strict comparison keeps the alphabetically-first product on ties.
        if best.as_ref().is_none_or(|b| delta > b.delta) {
            best = Some(TopGainer {
                product: product.to_string(),
                delta,
            });
        }
    }

    best
}

fn scores_at(history: &[SnapshotRow], time: DateTime<Utc>) -> HashMap<&str, f64> {
    history
        .iter()
        .filter(|row| row.time == time)
        .map(|row| (row.product.as_str(), row.trend_score))
        .collect()
}
