/// Probe executor - reachability checks and the sequential batch driver
///
/// This module is responsible for:
/// - Executing a single HEAD check against a URL
/// - Describing the outcome as a `ProbeResult`
/// - Running the configured targets one after another and recording them
pub mod checker;
pub mod runner;
pub mod types;

pub use checker::HttpChecker;
pub use runner::run_batch;
pub use types::ProbeResult;
