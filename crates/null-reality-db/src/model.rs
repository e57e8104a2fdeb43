//! Model trait and metadata for the ORM.
//!
//! The [`Model`] trait is what every persistent entity implements: it
//! exposes static metadata (table name, declared fields in order) and the
//! instance's current field values. [`ModelMeta`] holds the per-model
//! options.

use std::collections::BTreeMap;

use crate::fields::FieldDef;
use crate::query::Row;
use crate::value::Value;
use null_reality_core::{DbError, DbResult, ValidationError};

/// The core trait for all ORM models.
///
/// # Examples
///
/// ```
/// use null_reality_db::model::{Model, ModelMeta};
/// use null_reality_db::fields::{nullable_char_field, FieldDef, FieldType};
/// use null_reality_db::query::Row;
/// use null_reality_db::value::Value;
/// use null_reality_core::DbError;
///
/// struct Article {
///     id: Value,
///     title: Option<String>,
/// }
///
/// impl Model for Article {
///     fn meta() -> &'static ModelMeta {
///         use std::sync::LazyLock;
///         static META: LazyLock<ModelMeta> = LazyLock::new(|| {
///             ModelMeta::new("blog", "article", vec![
///                 FieldDef::new("id", FieldType::BigAutoField).primary_key(),
///                 nullable_char_field("title", 100),
///             ])
///         });
///         &META
///     }
///
///     fn pk(&self) -> Option<&Value> {
///         (!self.id.is_null()).then_some(&self.id)
///     }
///     fn set_pk(&mut self, value: Value) {
///         self.id = value;
///     }
///     fn field_values(&self) -> Vec<(&'static str, Value)> {
///         vec![("id", self.id.clone()), ("title", self.title.clone().into())]
///     }
///     fn from_row(row: &Row) -> Result<Self, DbError> {
///         Ok(Article { id: row.get("id")?, title: row.get("title")? })
///     }
/// }
///
/// assert_eq!(Article::table_name(), "blog_article");
/// ```
pub trait Model: Send + Sync + 'static {
    /// Returns the static metadata for this model type.
    fn meta() -> &'static ModelMeta;

    /// Returns the database table name.
    fn table_name() -> &'static str {
        &Self::meta().db_table
    }

    /// Returns the application label this model belongs to.
    fn app_label() -> &'static str {
        Self::meta().app_label
    }

    /// Returns a reference to the primary key value, or `None` if unsaved.
    fn pk(&self) -> Option<&Value>;

    /// Sets the primary key value on this instance (used after INSERT).
    fn set_pk(&mut self, value: Value);

    /// Returns the name of the primary key field (e.g., "id").
    fn pk_field_name() -> &'static str {
        Self::meta()
            .fields
            .iter()
            .find(|f| f.primary_key)
            .map_or("id", |f| f.name)
    }

    /// Returns all field name-value pairs for this instance.
    fn field_values(&self) -> Vec<(&'static str, Value)>;

    /// Returns field name-value pairs excluding the primary key.
    fn non_pk_field_values(&self) -> Vec<(&'static str, Value)> {
        let pk_name = Self::pk_field_name();
        self.field_values()
            .into_iter()
            .filter(|(name, _)| *name != pk_name)
            .collect()
    }

    /// Returns the current value of one field, or `None` if the instance
    /// does not report it.
    fn field_value(&self, name: &str) -> Option<Value> {
        self.field_values()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Constructs a model instance from a database row.
    fn from_row(row: &Row) -> Result<Self, DbError>
    where
        Self: Sized;
}

/// Metadata about a model.
#[derive(Debug)]
pub struct ModelMeta {
    /// The application label (e.g. "blog").
    pub app_label: &'static str,
    /// The model name in lowercase (e.g. "article").
    pub model_name: &'static str,
    /// The database table name.
    pub db_table: String,
    /// Human-readable singular name.
    pub verbose_name: String,
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl ModelMeta {
    /// Creates metadata with the conventional `<app_label>_<model_name>`
    /// table name.
    pub fn new(app_label: &'static str, model_name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            app_label,
            model_name,
            db_table: format!("{app_label}_{model_name}"),
            verbose_name: model_name.replace('_', " "),
            fields,
        }
    }

    /// Overrides the database table name.
    #[must_use]
    pub fn db_table(mut self, db_table: impl Into<String>) -> Self {
        self.db_table = db_table.into();
        self
    }

    /// Returns the field with the given name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Validates every non-primary-key field of `model`.
///
/// Unlike a save, this reports all failures at once, keyed by field name.
/// A value the instance does not report is treated as NULL.
pub fn full_clean<M: Model>(model: &M) -> DbResult<()> {
    let mut field_errors: BTreeMap<String, Vec<ValidationError>> = BTreeMap::new();

    for field in M::meta().fields.iter().filter(|f| !f.primary_key) {
        let value = model.field_value(field.name).unwrap_or(Value::Null);
        match field.clean(&value) {
            Ok(()) => {}
            Err(DbError::ValidationError(err)) => {
                field_errors.entry(field.name.to_string()).or_default().push(err);
            }
            Err(other) => return Err(other),
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::with_field_errors(field_errors).into())
    }
}
