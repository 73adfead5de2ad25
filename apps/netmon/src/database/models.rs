use chrono::NaiveDate;
use libsql::Row;
use serde::{Deserialize, Serialize};

use super::StoreError;
use super::timestamp;
use crate::probe::ProbeResult;

/// One row of the `daily_probe_summary` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub day: NaiveDate,
    pub total: u64,
    pub successes: u64,
    pub failures: u64,
    pub avg_duration_millis: f64,
    pub max_duration_millis: f64,
}

impl DailySummary {
    pub(crate) const COLUMNS: &'static str =
        "day, total, successes, failures, avg_duration_ms, max_duration_ms";

    pub(crate) fn from_row(row: &Row) -> Result<Self, StoreError> {
        let day: String = row.get(0).map_err(StoreError::query)?;

        Ok(Self {
            day: NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(StoreError::query)?,
            total: row.get::<i64>(1).map_err(StoreError::query)? as u64,
            successes: row.get::<i64>(2).map_err(StoreError::query)? as u64,
            failures: row.get::<i64>(3).map_err(StoreError::query)? as u64,
            avg_duration_millis: row.get(4).map_err(StoreError::query)?,
            max_duration_millis: row.get(5).map_err(StoreError::query)?,
        })
    }

    /// Share of successful probes that day, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successes as f64 * 100.0 / self.total as f64
    }
}

/// Column list matching [`probe_result_from_row`].
pub(crate) const PROBE_RESULT_COLUMNS: &str =
    "id, url, created_at, status_code, success, error_text, duration_ms";

pub(crate) fn probe_result_from_row(row: &Row) -> Result<ProbeResult, StoreError> {
    let created_at: String = row.get(2).map_err(StoreError::query)?;
    let created_at = timestamp::from_storage(&created_at)
        .ok_or_else(|| StoreError::query(format!("unparseable created_at {created_at:?}")))?;

    Ok(ProbeResult {
        id: Some(row.get(0).map_err(StoreError::query)?),
        url: row.get(1).map_err(StoreError::query)?,
        created_at,
        status_code: row.get::<i64>(3).map_err(StoreError::query)? as u16,
        success: row.get::<i64>(4).map_err(StoreError::query)? != 0,
        error_text: row.get(5).map_err(StoreError::query)?,
        duration_millis: row.get(6).map_err(StoreError::query)?,
    })
}
