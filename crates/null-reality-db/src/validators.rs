//! Field validators for the text family.
//!
//! Each standard text type brings its own validators (email syntax, slug
//! characters, ...). The null-respecting variants reuse these unchanged:
//! they only alter default-value computation, never validation.
//!
//! Validators only inspect [`Value::String`]; every other value passes, so
//! null handling stays with [`FieldDef::clean`](crate::fields::FieldDef::clean).

use std::fmt;

use null_reality_core::{DbError, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::Value;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(https?|ftps?)://[^\s/$.?#][^\s]*$").expect("valid regex"));

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid regex"));

static COMMA_SEPARATED_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:,\d+)*$").expect("valid regex"));

/// A trait for validating field values.
///
/// # Examples
///
/// ```
/// use null_reality_db::validators::{Validator, SlugValidator};
/// use null_reality_db::value::Value;
///
/// let v = SlugValidator;
/// assert!(v.validate(&Value::from("hello-world")).is_ok());
/// assert!(v.validate(&Value::from("hello world")).is_err());
/// ```
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &Value) -> Result<(), DbError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

fn invalid(message: &str, code: &str) -> DbError {
    DbError::ValidationError(ValidationError::new(message, code))
}

/// Validates that a string value does not exceed a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length, in characters.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> Result<(), DbError> {
        if let Value::String(s) = value {
            let len = s.chars().count();
            if len > self.max_length {
                return Err(DbError::ValidationError(
                    ValidationError::new(
                        format!(
                            "Ensure this value has at most {} characters (it has {len}).",
                            self.max_length
                        ),
                        "max_length",
                    )
                    .with_param("limit_value", self.max_length.to_string())
                    .with_param("show_value", len.to_string()),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }
}

/// Validates email address syntax.
#[derive(Debug, Clone, Copy)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(&self, value: &Value) -> Result<(), DbError> {
        match value {
            Value::String(s) if !EMAIL_RE.is_match(s) => {
                Err(invalid("Enter a valid email address.", "invalid"))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "EmailValidator"
    }
}

/// Validates that a value is an http(s) or ftp(s) URL.
#[derive(Debug, Clone, Copy)]
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn validate(&self, value: &Value) -> Result<(), DbError> {
        match value {
            Value::String(s) if !URL_RE.is_match(s) => Err(invalid("Enter a valid URL.", "invalid")),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "UrlValidator"
    }
}

/// Validates that a value contains only letters, numbers, underscores, or hyphens.
#[derive(Debug, Clone, Copy)]
pub struct SlugValidator;

impl Validator for SlugValidator {
    fn validate(&self, value: &Value) -> Result<(), DbError> {
        match value {
            Value::String(s) if !SLUG_RE.is_match(s) => Err(invalid(
                "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.",
                "invalid",
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "SlugValidator"
    }
}

/// Validates a comma-separated list of non-negative integers, such as `1,2,3`.
#[derive(Debug, Clone, Copy)]
pub struct CommaSeparatedIntegerValidator;

impl Validator for CommaSeparatedIntegerValidator {
    fn validate(&self, value: &Value) -> Result<(), DbError> {
        match value {
            Value::String(s) if !COMMA_SEPARATED_INT_RE.is_match(s) => {
                Err(invalid("Enter only digits separated by commas.", "invalid"))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "CommaSeparatedIntegerValidator"
    }
}
