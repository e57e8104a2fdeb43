//! Logging integration.
//!
//! Configures a [`tracing`] subscriber from [`Settings`] and provides the
//! span used around a null-checked save.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`; an invalid directive falls
/// back to "info". Debug mode uses a pretty, human-readable format, otherwise
/// a structured JSON format is used. If a subscriber is already installed
/// this is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for a save against `table`.
///
/// # Examples
///
/// ```
/// use null_reality_core::logging::save_span;
///
/// let span = save_span("article");
/// let _guard = span.enter();
/// tracing::debug!("checking fields");
/// ```
pub fn save_span(table: &str) -> tracing::Span {
    tracing::info_span!("save", table = table)
}
