use std::env::var;
use std::io;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log line format (`json` or compact).
pub const LOG_FORMAT_VAR: &str = "RUST_LOG_FORMAT";

pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initialize the global subscriber with `level` as the default directive.
///
/// `RUST_LOG` still takes precedence. Output goes to stderr so stdout stays
/// reserved for the probe report.
pub fn init_with_level(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var(LOG_FORMAT_VAR).unwrap_or_default();

    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_writer(io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    if let Err(error) = tracing_subscriber::registry().with(log_layer).try_init() {
        warn!("Tracing subscriber was already installed: {error}");
    }
}

/// Subscriber for tests; safe to call from every test.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
