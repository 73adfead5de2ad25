//! Read operations behind the HTTP routes.
//!
//! Every call goes straight to the store; nothing is cached between requests.

use tracing::error;

use super::error::ServiceError;
use super::render;
use crate::database::{DailySummary, ResultStore};
use crate::probe::ProbeResult;

/// Number of results shown by `/` and `/status`
pub const DEFAULT_HISTORY_LIMIT: u8 = 10;

/// Number of days listed in the daily summary
pub const DAILY_SUMMARY_DAYS: u8 = 14;

/// The `n` most recent results, newest first.
pub async fn get_status(store: &dyn ResultStore, n: u8) -> Result<Vec<ProbeResult>, ServiceError> {
    store.recent_results(n).await.map_err(|e| {
        error!("Failed to load recent results: {e}");
        ServiceError::from(e)
    })
}

/// Per-day aggregates for the `days` most recent days.
pub async fn get_daily(store: &dyn ResultStore, days: u8) -> Result<Vec<DailySummary>, ServiceError> {
    store.daily_summary(days).await.map_err(|e| {
        error!("Failed to load daily summary: {e}");
        ServiceError::from(e)
    })
}

/// The `n` most recent results rendered as an HTML page.
pub async fn get_summary(store: &dyn ResultStore, n: u8) -> Result<String, ServiceError> {
    let results = get_status(store, n).await?;
    let daily = get_daily(store, DAILY_SUMMARY_DAYS).await?;
    Ok(render::summary_page(&results, &daily))
}
