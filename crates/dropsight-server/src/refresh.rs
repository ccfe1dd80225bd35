//! Serialized pipeline refresh.

use dropsight_core::{CycleParams, ScoredRow};
use dropsight_pipeline::run_cycle;

use crate::api::AppState;

/// Run one pipeline cycle under the cycle gate.
///
/// Scheduler ticks and user-triggered refreshes share this entry point, so
/// at most one cycle runs against the snapshot store at a time; a concurrent
/// caller simply waits for the in-flight cycle to finish.
pub async fn run_refresh(state: &AppState, params: CycleParams) -> Vec<ScoredRow> {
    let _guard = state.cycle_gate.lock().await;
    run_cycle(
        &state.pool,
        &state.client,
        &state.sources,
        &state.products,
        params,
    )
    .await
}
