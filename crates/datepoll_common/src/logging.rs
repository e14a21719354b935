//! Logging utilities for the Datepoll application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace by initializing the tracing subscriber.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use datepoll_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the `datepoll` target is additionally set to `level`.
/// Calling this twice is harmless, the second call is ignored.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    match format!("datepoll={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(err) => eprintln!("Ignoring invalid log directive: {}", err),
    }

    // try_init fails when a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
