//! Shared tracing setup for the netmon binaries.

mod tracing;

pub use self::tracing::{init as init_tracing, init_test as init_test_tracing, init_with_level};
