//! Trend aggregation and scoring pipeline.
//!
//! One cycle runs fetch → normalize → score → persist: the signal adapters
//! produce raw per-product readings, [`normalize`] rescales each signal
//! column to a common 0-100 range, [`score`] folds the columns into the
//! ranking metrics, and the snapshot store appends the batch. [`history`]
//! derives period-over-period deltas from the persisted snapshots.

pub mod cycle;
pub mod history;
pub mod normalize;
pub mod score;

pub use cycle::run_cycle;
pub use history::{compute_top_gainer, TopGainer};

/// Guard against division by zero in batch-relative computations.
pub(crate) const EPSILON: f64 = 1e-9;
