// ==========================================
// League Availability - Logging setup
// ==========================================
// tracing + tracing-subscriber; level from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when RUST_LOG is unset.
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// # Environment
/// - RUST_LOG: filter directive (default: info),
///   e.g. `RUST_LOG=league_availability=debug,slow_sql=warn`
/// - LEAGUE_AVAILABILITY_LOG_JSON=1: one JSON object per line
///
/// ```no_run
/// use league_availability::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("LEAGUE_AVAILABILITY_LOG_JSON")
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false);

    // stderr keeps stdout free for command output
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Subscriber for tests: debug level, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
