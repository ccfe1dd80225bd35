use std::time::Duration;

use crate::SourceError;

/// Build the shared HTTP client used by all signal sources.
///
/// Every request carries a bounded timeout so one unresponsive source cannot
/// stall a pipeline cycle.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialised.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()?)
}
