//! Settings for null-reality.
//!
//! The [`Settings`] struct holds the little configuration the library needs:
//! whether debug output is wanted, the log filter, and the database the
//! executor talks to. Every field has a default, so a partial config file
//! is enough.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// The database engine (e.g. `sqlite`, `postgresql`, `mysql`).
    pub engine: String,
    /// The database name (or file path for `SQLite`).
    pub name: String,
    /// Additional engine-specific options.
    pub options: HashMap<String, String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "sqlite".to_string(),
            name: "db.sqlite3".to_string(),
            options: HashMap::new(),
        }
    }
}

/// The complete set of library settings.
///
/// # Examples
///
/// ```
/// use null_reality_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.database.engine, "sqlite");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects pretty log output.
    pub debug: bool,
    /// The tracing filter directive (e.g. "info", "null_reality_db=debug").
    pub log_level: String,
    /// The database used by the executor.
    pub database: DatabaseSettings,
    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            database: DatabaseSettings::default(),
            extra: HashMap::new(),
        }
    }
}
