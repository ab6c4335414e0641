mod bindings;
mod concurrency;
mod outcomes;
mod rollback;
mod streaming;

use log::LevelFilter;
use std::env;
use strata::Connection;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Runs the backend-generic property suite against one open connection.
///
/// The suite creates and drops its own tables (`suite_*`), uses positional
/// placeholders only, and exercises every driver through the exact same
/// calls, so each backend is independently validated against the same
/// contract.
pub fn execute_suite<C: Connection>(connection: &C) {
    log::info!("running the suite against {}", connection.version());
    streaming::streaming(connection);
    bindings::bindings(connection);
    outcomes::outcomes(connection);
    rollback::rollback(connection);
    concurrency::concurrency(connection);
}
