//! Field type definitions.
//!
//! Each [`FieldType`] variant names a storage family; [`FieldDef`] captures
//! everything else about a declared model field. Default-value computation
//! is delegated to the [`DefaultPolicy`] the field type selects, which is
//! how the null-respecting variants change behavior without touching the
//! storage family they wrap.

use crate::fields::nullable::{DefaultPolicy, NullableKind};
use crate::validators::{
    CommaSeparatedIntegerValidator, EmailValidator, MaxLengthValidator, SlugValidator,
    UrlValidator, Validator,
};
use crate::value::Value;
use null_reality_core::{DbError, ValidationError};

/// The type of a model field.
///
/// The text family (`CharField` through `CommaSeparatedIntegerField`)
/// allows empty strings, which is what makes the framework default an empty
/// string. [`FieldType::Nullable`] wraps one of those families with the
/// null-respecting default policy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum FieldType {
    /// Auto-incrementing 32-bit integer primary key.
    AutoField,
    /// Auto-incrementing 64-bit integer primary key.
    BigAutoField,
    /// Variable-length string with a max length.
    CharField,
    /// Unlimited-length text.
    TextField,
    /// Email address (CharField with email validation).
    EmailField,
    /// URL (CharField with URL validation).
    UrlField,
    /// Slug (URL-friendly string).
    SlugField,
    /// Digits separated by commas (CharField with list validation).
    CommaSeparatedIntegerField,
    /// 64-bit signed integer.
    IntegerField,
    /// Boolean (true/false).
    BooleanField,
    /// 64-bit floating-point number.
    FloatField,
    /// Date and time.
    DateTimeField,
    /// UUID field.
    UuidField,
    /// JSON data.
    JsonField,
    /// A text field that respects `null = false`.
    Nullable {
        /// Which null-respecting variant this is.
        kind: NullableKind,
    },
    /// An application-defined field specialising another field type.
    ///
    /// It inherits its base's storage, validators, and default policy, but
    /// it is a distinct type: the save-time null check does not treat a
    /// custom field as marked even when its base is.
    Custom {
        /// The application's name for this field type.
        type_name: String,
        /// The field type being specialised.
        base: Box<FieldType>,
    },
}

impl FieldType {
    /// Shorthand for `FieldType::Nullable { kind }`.
    pub const fn nullable(kind: NullableKind) -> Self {
        Self::Nullable { kind }
    }

    /// Creates a custom field type specialising `base`.
    pub fn custom(type_name: impl Into<String>, base: Self) -> Self {
        Self::Custom {
            type_name: type_name.into(),
            base: Box::new(base),
        }
    }

    /// Returns `true` if the framework may store an empty string in place
    /// of a missing value for this type.
    pub fn empty_strings_allowed(&self) -> bool {
        match self {
            Self::CharField
            | Self::TextField
            | Self::EmailField
            | Self::UrlField
            | Self::SlugField
            | Self::CommaSeparatedIntegerField => true,
            Self::AutoField
            | Self::BigAutoField
            | Self::IntegerField
            | Self::BooleanField
            | Self::FloatField
            | Self::DateTimeField
            | Self::UuidField
            | Self::JsonField => false,
            // The bare marker behaves like a generic field, which allows them.
            Self::Nullable { kind } => kind.storage().map_or(true, |s| s.empty_strings_allowed()),
            Self::Custom { base, .. } => base.empty_strings_allowed(),
        }
    }

    /// Returns the policy used to compute this type's default value.
    pub fn default_policy(&self) -> DefaultPolicy {
        match self {
            Self::Nullable { .. } => DefaultPolicy::NullRespecting,
            Self::Custom { base, .. } => base.default_policy(),
            _ => DefaultPolicy::Framework,
        }
    }

    /// Returns the validators every field of this type runs.
    pub fn default_validators(&self) -> Vec<Box<dyn Validator>> {
        match self {
            Self::EmailField => vec![Box::new(EmailValidator)],
            Self::UrlField => vec![Box::new(UrlValidator)],
            Self::SlugField => vec![Box::new(SlugValidator)],
            Self::CommaSeparatedIntegerField => vec![Box::new(CommaSeparatedIntegerValidator)],
            Self::Nullable { kind } => kind
                .storage()
                .map_or_else(Vec::new, |s| s.default_validators()),
            Self::Custom { base, .. } => base.default_validators(),
            _ => Vec::new(),
        }
    }

    /// Returns the type name as the application sees it.
    pub fn type_name(&self) -> &str {
        match self {
            Self::AutoField => "AutoField",
            Self::BigAutoField => "BigAutoField",
            Self::CharField => "CharField",
            Self::TextField => "TextField",
            Self::EmailField => "EmailField",
            Self::UrlField => "UrlField",
            Self::SlugField => "SlugField",
            Self::CommaSeparatedIntegerField => "CommaSeparatedIntegerField",
            Self::IntegerField => "IntegerField",
            Self::BooleanField => "BooleanField",
            Self::FloatField => "FloatField",
            Self::DateTimeField => "DateTimeField",
            Self::UuidField => "UuidField",
            Self::JsonField => "JsonField",
            Self::Nullable { kind } => kind.type_name(),
            Self::Custom { type_name, .. } => type_name.as_str(),
        }
    }
}

/// Complete definition of a model field.
///
/// Declared once per model (usually inside a static [`ModelMeta`](crate::model::ModelMeta))
/// and never mutated afterwards.
#[derive(Debug)]
pub struct FieldDef {
    /// The attribute name of this field.
    pub name: &'static str,
    /// The database column name (may differ from `name`).
    pub column: String,
    /// The type of this field.
    pub field_type: FieldType,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether NULL is allowed in the database.
    pub null: bool,
    /// Whether the field may be left blank.
    pub blank: bool,
    /// Explicit default value for new instances.
    pub default: Option<Value>,
    /// Maximum character length (for CharField and similar).
    pub max_length: Option<usize>,
    /// Human-readable help text.
    pub help_text: String,
    /// Human-readable name for the field.
    pub verbose_name: String,
    /// Extra validators, run after the type's own validators.
    pub validators: Vec<Box<dyn Validator>>,
    /// Whether the field is editable in forms.
    pub editable: bool,
}

impl FieldDef {
    /// Creates a new `FieldDef` with sensible defaults.
    ///
    /// Only the field name and type are required. All other attributes take
    /// their default values (non-null, not blank, editable, no explicit
    /// default).
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            column: name.to_string(),
            field_type,
            primary_key: false,
            null: false,
            blank: false,
            default: None,
            max_length: None,
            help_text: String::new(),
            verbose_name: name.replace('_', " "),
            validators: Vec::new(),
            editable: true,
        }
    }

    /// Sets the database column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Allows NULL values in the database.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Allows blank values.
    #[must_use]
    pub const fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the default value for this field.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets whether the field is editable in forms.
    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns `true` if an explicit default was declared.
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Computes the value a new instance gets when none is provided.
    ///
    /// # Examples
    ///
    /// ```
    /// use null_reality_db::fields::{nullable_char_field, FieldDef, FieldType};
    /// use null_reality_db::value::Value;
    ///
    /// let plain = FieldDef::new("title", FieldType::CharField).max_length(100);
    /// assert_eq!(plain.get_default(), Value::from(""));
    ///
    /// let strict = nullable_char_field("title", 100);
    /// assert_eq!(strict.get_default(), Value::Null);
    /// ```
    pub fn get_default(&self) -> Value {
        self.field_type.default_policy().compute(self)
    }

    /// The framework's own default: the explicit default if declared, else
    /// an empty string for types that allow one, else NULL.
    pub fn framework_default(&self) -> Value {
        if let Some(default) = &self.default {
            return default.clone();
        }
        if self.field_type.empty_strings_allowed() {
            Value::String(String::new())
        } else {
            Value::Null
        }
    }

    /// Validates a value against this field's nullability, blankness, and
    /// validators, in that order.
    pub fn clean(&self, value: &Value) -> Result<(), DbError> {
        if value.is_null() {
            if self.null {
                return Ok(());
            }
            return Err(ValidationError::new("This field cannot be null.", "null").into());
        }

        if !self.blank && value.as_str().is_some_and(str::is_empty) {
            return Err(ValidationError::new("This field cannot be blank.", "blank").into());
        }

        for validator in self.field_type.default_validators() {
            validator.validate(value)?;
        }
        if let Some(max_length) = self.max_length {
            MaxLengthValidator::new(max_length).validate(value)?;
        }
        for validator in &self.validators {
            validator.validate(value)?;
        }
        Ok(())
    }
}
