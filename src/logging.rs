//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// Everything is written to stderr; stdout is reserved for the response text.
pub fn init(verbose: bool) {
    let level = if verbose { "nes_submit=debug" } else { "warn" };
    let env = Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
