use std::fmt;
use std::io::{self, Write};

use tracing::{error, info};

use super::checker::Checker;
use crate::database::ResultStore;

/// Tally of one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub checked: usize,
    pub up: usize,
    pub down: usize,
    /// Results that were shown but could not be written to the store.
    pub unsaved: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checked, {} up, {} down, {} not recorded",
            self.checked, self.up, self.down, self.unsaved
        )
    }
}

/// Check `urls` one at a time, in order, recording every result.
///
/// Each outcome is written to `out` as soon as it is known. A failed probe or
/// a failed save never stops the batch; only a failing `out` does.
pub async fn run_batch(
    checker: &dyn Checker,
    store: &dyn ResultStore,
    urls: &[String],
    out: &mut impl Write,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for url in urls {
        let result = checker.check(url).await;
        report.checked += 1;

        let result = match store.save(result.clone()).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("Could not record result for {url}: {e}");
                report.unsaved += 1;
                result
            }
        };

        if result.success {
            report.up += 1;
            info!(url = %url, duration_ms = result.duration_millis, "target is up");
            writeln!(out, "{url} is up ({:.3}ms)", result.duration_millis)?;
        } else {
            report.down += 1;
            info!(url = %url, status = result.status_code, error = %result.error_text, "target is down");
            writeln!(out, "{url} is down! {result}")?;
        }
    }

    Ok(report)
}
