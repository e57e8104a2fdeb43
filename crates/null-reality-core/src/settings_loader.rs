//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `NULL_REALITY_DEBUG` | `debug` |
//! | `NULL_REALITY_LOG_LEVEL` | `log_level` |
//! | `NULL_REALITY_DB_ENGINE` | `database.engine` |
//! | `NULL_REALITY_DB_NAME` | `database.name` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use null_reality_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/null_reality.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::DbError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the document keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, DbError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| DbError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, DbError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, DbError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, DbError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| DbError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, DbError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `NULL_REALITY_DEBUG` accepts "true"/"1"/"yes" (any case) as true; any
/// other value means false.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("NULL_REALITY_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("NULL_REALITY_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("NULL_REALITY_DB_ENGINE") {
        settings.database.engine = val;
    }

    if let Some(val) = lookup("NULL_REALITY_DB_NAME") {
        settings.database.name = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, DbError> {
    std::fs::read_to_string(path).map_err(|e| {
        DbError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, DbError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        DbError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        DbError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. `override_val` wins.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_partial() {
        let toml = r#"
            debug = false
            log_level = "null_reality_db=debug"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "null_reality_db=debug");
        // Defaults preserved
        assert_eq!(settings.database.engine, "sqlite");
    }

    #[test]
    fn test_from_toml_str_nested_database_merges() {
        let toml = r#"
            [database]
            engine = "postgresql"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.database.engine, "postgresql");
        assert_eq!(settings.database.name, "db.sqlite3");
    }

    #[test]
    fn test_from_toml_str_malformed() {
        let err = from_toml_str("debug = = true").unwrap_err();
        assert!(matches!(err, DbError::ConfigurationError(_)));
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str("debug = \"nope\"").unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize settings from TOML"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"warn\"").unwrap();

        let settings = from_toml_file(file.path()).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/null_reality.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_partial() {
        let json = r#"{"database": {"engine": "mysql", "name": "app"}}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.database.engine, "mysql");
        assert_eq!(settings.database.name, "app");
        assert!(settings.debug);
    }

    #[test]
    fn test_from_json_str_extra() {
        let json = r#"{"extra": {"feature": true}}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.extra.get("feature"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"debug": false}}"#).unwrap();

        let settings = from_json_file(file.path()).unwrap();
        assert!(!settings.debug);
    }

    #[test]
    fn test_from_json_str_malformed() {
        let err = from_json_str("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = [
            ("NULL_REALITY_DEBUG", "FALSE"),
            ("NULL_REALITY_LOG_LEVEL", "trace"),
            ("NULL_REALITY_DB_ENGINE", "postgresql"),
            ("NULL_REALITY_DB_NAME", "articles"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, |key| env.get(key).map(ToString::to_string));
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.database.engine, "postgresql");
        assert_eq!(settings.database.name, "articles");
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("NULL_REALITY_DB_NAME", "from-env.sqlite3");
        std::env::set_var("NULL_REALITY_LOG_LEVEL", "warn");
        let settings = from_env();
        assert_eq!(settings.database.name, "from-env.sqlite3");
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.database.engine, "sqlite");
        std::env::remove_var("NULL_REALITY_DB_NAME");
        std::env::remove_var("NULL_REALITY_LOG_LEVEL");
    }

    #[test]
    fn test_apply_overrides_debug_truthy_values() {
        for val in ["true", "1", "YES"] {
            let mut settings = Settings::default();
            settings.debug = false;
            apply_overrides(&mut settings, |key| {
                (key == "NULL_REALITY_DEBUG").then(|| val.to_string())
            });
            assert!(settings.debug, "{val} should enable debug");
        }
    }

    #[test]
    fn test_apply_overrides_absent_keeps_values() {
        let mut settings = Settings::default();
        settings.log_level = "error".to_string();
        apply_overrides(&mut settings, |_| None);
        assert_eq!(settings.log_level, "error");
    }

    #[test]
    fn test_merge_json_deep() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }
}
