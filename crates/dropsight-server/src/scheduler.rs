//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! periodic trend-refresh job.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use dropsight_core::CycleParams;

use crate::api::AppState;
use crate::refresh::run_refresh;

/// Builds and starts the background job scheduler.
///
/// Registers the recurring trend-refresh job and starts the scheduler.
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_refresh_job(&scheduler, state).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the periodic trend-refresh job.
///
/// The schedule comes from `DROPSIGHT_REFRESH_CRON` (default: every five
/// minutes). Each tick runs one pipeline cycle with the configured default
/// markup and shipping; cycles are serialized through the cycle gate, so a
/// slow cycle delays the next tick instead of overlapping it.
async fn register_refresh_job(
    scheduler: &JobScheduler,
    state: AppState,
) -> Result<(), JobSchedulerError> {
    let schedule = state.config.refresh_cron.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting trend refresh cycle");
            let params = CycleParams {
                markup: state.config.default_markup,
                shipping: state.config.default_shipping,
            };
            let batch = run_refresh(&state, params).await;
            tracing::info!(rows = batch.len(), "scheduler: trend refresh cycle complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
