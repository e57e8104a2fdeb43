//! Error types for null-reality.
//!
//! [`DbError`] covers the failures the ORM layer can report: integrity
//! violations raised before a write, database errors propagated from an
//! executor, field validation errors, and configuration problems.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A validation error with optional per-field errors.
///
/// A simple error carries a single message and code. A compound error
/// carries per-field error lists instead, which is what
/// `full_clean` produces for a whole model.
///
/// # Examples
///
/// ```
/// use null_reality_core::error::ValidationError;
///
/// let err = ValidationError::new("This field cannot be null.", "null");
/// assert_eq!(err.to_string(), "This field cannot be null.");
///
/// let mut field_errors = std::collections::BTreeMap::new();
/// field_errors.insert("title".to_string(), vec![err]);
/// let err = ValidationError::with_field_errors(field_errors);
/// assert_eq!(err.to_string(), "title: This field cannot be null.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the failure (e.g. "null", "invalid").
    pub code: String,
    /// Extra parameters giving context for the message.
    pub params: BTreeMap<String, String>,
    /// Per-field errors, keyed by field name.
    pub field_errors: BTreeMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: BTreeMap::new(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Creates a `ValidationError` holding per-field errors.
    pub fn with_field_errors(field_errors: BTreeMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: BTreeMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The error type for all null-reality operations.
#[derive(Error, Debug)]
pub enum DbError {
    /// A database integrity constraint was violated.
    ///
    /// Raised before any write when a null-respecting field holds null. The
    /// payload reads `<table>.<field> may not be null`.
    #[error("{0}")]
    IntegrityError(String),

    /// A generic database error, usually reported by an executor.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A query expected exactly one row but found none.
    #[error("Object does not exist: {0}")]
    DoesNotExist(String),

    /// One or more fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DbError {
    /// Returns a short, stable code for this error, suitable for log fields.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IntegrityError(_) => "integrity_error",
            Self::DatabaseError(_) => "database_error",
            Self::DoesNotExist(_) => "does_not_exist",
            Self::ValidationError(_) => "validation_error",
            Self::ConfigurationError(_) => "configuration_error",
            Self::IoError(_) => "io_error",
        }
    }

    /// Returns `true` if this is an integrity violation.
    pub const fn is_integrity_error(&self) -> bool {
        matches!(self, Self::IntegrityError(_))
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, DbError>`.
pub type DbResult<T> = Result<T, DbError>;
