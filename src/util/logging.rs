// CustView - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr. Search query text is never logged, only its length.

use super::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// A valid RUST_LOG wins; otherwise `--debug`, then the config level, then
/// `info`.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if debug_flag {
            "debug"
        } else {
            config_level.unwrap_or(DEFAULT_LOG_LEVEL)
        };
        EnvFilter::new(level)
    });

    // Search runs on named threads; thread names make interleaved
    // progress lines readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(app = APP_NAME, version = APP_VERSION, "Logging initialised");
}
