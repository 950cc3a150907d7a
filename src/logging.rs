//! Log setup.
//!
//! Output goes to `logs/lapse.log` only; writing to the terminal would
//! corrupt the TUI.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::LapseError;

/// Environment variable holding a filter directive that overrides everything else.
pub const LOG_ENV: &str = "LAPSE_LOG";

/// Pick the filter directive: `LAPSE_LOG`, then `--verbose`, then config.
///
/// Bare levels are scoped to this crate.
#[must_use]
pub fn filter_directive(env: Option<&str>, verbose: bool, configured: &str) -> String {
    if let Some(directive) = env.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }

    let level = if verbose { "debug" } else { configured.trim() };
    if level.contains('=') {
        level.to_string()
    } else {
        format!("lapse={level}")
    }
}

/// Install the global subscriber writing to `log_file`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or the directive is
/// malformed.
pub fn init(log_file: &Path, verbose: bool, configured: &str) -> Result<(), LapseError> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env.as_deref(), verbose, configured);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| LapseError::Config(format!("Invalid log filter '{directive}': {e}")))?;

    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
