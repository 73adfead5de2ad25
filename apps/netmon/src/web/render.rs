use std::fmt::Write;

use crate::database::DailySummary;
use crate::probe::ProbeResult;

pub const PAGE_TITLE: &str = "netmon: recent checks";

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:2em}\
th,td{border:1px solid #ccc;padding:.3em .6em;text-align:left}\
tr.down td{background:#fde8e8}tr.up td{background:#e8f8ec}";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Full page: recent results followed by the daily summary.
pub fn summary_page(results: &[ProbeResult], daily: &[DailySummary]) -> String {
    let mut page = String::new();

    // writing into a String cannot fail
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = escape_html(PAGE_TITLE)
    );

    page.push_str(&results_table(results));
    page.push_str(&daily_table(daily));
    page.push_str("</body>\n</html>\n");
    page
}

fn results_table(results: &[ProbeResult]) -> String {
    let mut table = String::from("<h2>Latest results</h2>\n");

    if results.is_empty() {
        table.push_str("<p>No checks recorded yet.</p>\n");
        return table;
    }

    table.push_str(
        "<table>\n<tr><th>URL</th><th>Time</th><th>Status</th><th>Success</th>\
         <th>Duration (ms)</th><th>Error</th></tr>\n",
    );
    for result in results {
        let _ = writeln!(
            table,
            "<tr class=\"{class}\"><td>{url}</td><td>{time}</td><td>{status}</td><td>{success}</td>\
             <td>{duration:.3}</td><td>{error}</td></tr>",
            class = if result.success { "up" } else { "down" },
            url = escape_html(&result.url),
            time = result.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            status = result.status_code,
            success = result.success,
            duration = result.duration_millis,
            error = escape_html(&result.error_text),
        );
    }
    table.push_str("</table>\n");
    table
}

fn daily_table(daily: &[DailySummary]) -> String {
    if daily.is_empty() {
        return String::new();
    }

    let mut table = String::from(
        "<h2>Daily summary</h2>\n<table>\n<tr><th>Day</th><th>Total</th><th>Up</th><th>Down</th>\
         <th>Success rate</th><th>Avg (ms)</th><th>Max (ms)</th></tr>\n",
    );
    for day in daily {
        let _ = writeln!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.3}</td><td>{:.3}</td></tr>",
            day.day,
            day.total,
            day.successes,
            day.failures,
            day.success_rate(),
            day.avg_duration_millis,
            day.max_duration_millis,
        );
    }
    table.push_str("</table>\n");
    table
}
