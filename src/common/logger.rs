use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Maps a `-v` repeat count to the crate's log level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn initialize_logger() {
    initialize_logger_with_level(LevelFilter::Info);
}

/// Sets up `env_logger` once per process. `RUST_LOG` overrides `level`.
pub fn initialize_logger_with_level(level: LevelFilter) {
    // Use call_once_force to recover if an earlier initialization attempt panicked.
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("course_catalog", level)
            .filter_module("rustyline", LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();

        // Avoid panicking if the logger was already initialized elsewhere.
        let _ = builder.try_init();
    });
}
