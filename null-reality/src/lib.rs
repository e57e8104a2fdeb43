//! # null-reality
//!
//! Model and field utilities that make text fields respect `null = false`.
//!
//! This is the meta-crate that re-exports the sub-crates. Most applications
//! only need the [`prelude`]:
//!
//! ```
//! use null_reality::prelude::*;
//!
//! let title = nullable_char_field("title", 200);
//! assert_eq!(title.get_default(), Value::Null);
//! ```

/// Error types, settings, and logging.
pub use null_reality_core as core;

/// Fields, models, persistence, and the save-time NULL check.
pub use null_reality_db as db;

/// Re-exported so executors can be implemented without a direct dependency.
pub use async_trait::async_trait;

use null_reality_core::{logging, DbResult, Settings};
use null_reality_db::DatabaseBackendType;

/// Installs logging from `settings` and resolves the configured backend.
///
/// Call once at startup; the returned backend type is what a
/// [`DbExecutor`](null_reality_db::DbExecutor) implementation should report.
///
/// # Errors
///
/// Returns `ConfigurationError` if `settings.database.engine` is not a
/// supported engine.
pub fn init(settings: &Settings) -> DbResult<DatabaseBackendType> {
    logging::setup_logging(settings);
    let backend = DatabaseBackendType::from_engine(&settings.database.engine)?;
    tracing::info!(engine = %settings.database.engine, ?backend, "null-reality initialised");
    Ok(backend)
}

/// The types and functions most applications use.
pub mod prelude {
    pub use null_reality_core::{DbError, DbResult, Settings, ValidationError};
    pub use null_reality_db::{
        check_null_fields, create_model, create_null_checked, full_clean, nullable_char_field,
        nullable_comma_separated_integer_field, nullable_email_field, nullable_field,
        nullable_slug_field, nullable_text_field, nullable_url_field, refresh_model, save_model,
        save_model_with, save_null_checked, save_null_checked_with, DatabaseBackendType,
        DbExecutor, FieldDef, FieldType, Model, ModelMeta, NullCheckerModel, NullableKind, Row,
        SaveOptions, SaveOutcome, Value,
    };
}
