//! Save-time NULL checking for null-respecting fields.
//!
//! The framework's text fields quietly turn a missing value into an empty
//! string, so a `null = false` column never raises an integrity error. A
//! model that uses the [`nullable`](crate::fields::nullable) field variants
//! and saves through [`save_null_checked`] gets the error instead:
//!
//! ```text
//! article.title may not be null
//! ```
//!
//! The check runs entirely in memory before any SQL is issued, so a
//! rejected save writes nothing.
//!
//! Only fields whose type is exactly [`FieldType::Nullable`] are checked.
//! A [`FieldType::Custom`] built on top of a nullable variant inherits its
//! NULL default but is not checked here, and plain text fields keep the
//! framework behavior.

use null_reality_core::logging::save_span;
use null_reality_core::{DbError, DbResult};
use tracing::Instrument;

use crate::executor::{save_model_with, DbExecutor, SaveOptions, SaveOutcome};
use crate::fields::FieldType;
use crate::model::Model;
use crate::value::Value;

/// Returns `true` if the save-time NULL check applies to fields of this type.
pub const fn is_marked(field_type: &FieldType) -> bool {
    matches!(field_type, FieldType::Nullable { .. })
}

/// Rejects `model` if any marked field currently holds NULL.
///
/// Fields are scanned in declaration order and the first offending field is
/// reported. A marked field missing from the instance's values counts as
/// NULL.
///
/// # Errors
///
/// Returns `DbError::IntegrityError("<db_table>.<field> may not be null")`.
pub fn check_null_fields<M: Model>(model: &M) -> DbResult<()> {
    let meta = M::meta();
    let values = model.field_values();

    for field in meta.fields.iter().filter(|f| is_marked(&f.field_type)) {
        let is_null = values
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or(true, |(_, value)| value.is_null());
        if is_null {
            tracing::warn!(
                table = %meta.db_table,
                field = field.name,
                "null value in null-respecting field"
            );
            return Err(DbError::IntegrityError(format!(
                "{}.{} may not be null",
                meta.db_table, field.name
            )));
        }
    }

    tracing::debug!(table = %meta.db_table, "null check passed");
    Ok(())
}

/// A model whose saves reject NULL in null-respecting fields.
///
/// The trait adds no fields and no table of its own; implementing it only
/// opts the model in to [`NullCheckerModel::check_nulls`] and the checked
/// save functions.
pub trait NullCheckerModel: Model {
    /// Runs [`check_null_fields`] on this instance.
    fn check_nulls(&self) -> DbResult<()>
    where
        Self: Sized,
    {
        check_null_fields(self)
    }

    /// Returns each marked field's computed default, for initialising a new
    /// instance.
    ///
    /// For a non-nullable marked field this is always NULL, which
    /// [`check_nulls`](Self::check_nulls) rejects unless a value is assigned.
    fn marked_defaults() -> Vec<(&'static str, Value)>
    where
        Self: Sized,
    {
        Self::meta()
            .fields
            .iter()
            .filter(|f| is_marked(&f.field_type))
            .map(|f| (f.name, f.get_default()))
            .collect()
    }
}

/// Checks `model` for NULL marked fields, then saves it with default options.
pub async fn save_null_checked<M: NullCheckerModel>(
    model: &mut M,
    db: &dyn DbExecutor,
) -> DbResult<SaveOutcome> {
    save_null_checked_with(model, db, &SaveOptions::default()).await
}

/// Checks `model` for NULL marked fields, then delegates to
/// [`save_model_with`] once with `options` unchanged.
///
/// The check covers every marked field, including ones outside
/// `options.update_fields`. On failure the executor is never called.
pub async fn save_null_checked_with<M: NullCheckerModel>(
    model: &mut M,
    db: &dyn DbExecutor,
    options: &SaveOptions,
) -> DbResult<SaveOutcome> {
    let span = save_span(M::table_name());
    async move {
        model.check_nulls()?;
        save_model_with(model, db, options).await
    }
    .instrument(span)
    .await
}

/// Checks `model` for NULL marked fields, then INSERTs it.
pub async fn create_null_checked<M: NullCheckerModel>(
    model: &mut M,
    db: &dyn DbExecutor,
) -> DbResult<SaveOutcome> {
    save_null_checked_with(model, db, &SaveOptions::insert()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{
        nullable_char_field, nullable_email_field, nullable_field, FieldDef, NullableKind,
        NULLABLE_KINDS,
    };
    use crate::model::ModelMeta;
    use crate::query::Row;

    struct Profile {
        id: Value,
        handle: Option<String>,
        email: Option<String>,
        bio: Option<String>,
    }

    impl Model for Profile {
        fn meta() -> &'static ModelMeta {
            use std::sync::LazyLock;
            static META: LazyLock<ModelMeta> = LazyLock::new(|| {
                ModelMeta::new(
                    "accounts",
                    "profile",
                    vec![
                        FieldDef::new("id", FieldType::BigAutoField).primary_key(),
                        nullable_char_field("handle", 30),
                        nullable_email_field("email"),
                        FieldDef::new("bio", FieldType::TextField),
                    ],
                )
            });
            &META
        }

        fn pk(&self) -> Option<&Value> {
            (!self.id.is_null()).then_some(&self.id)
        }

        fn set_pk(&mut self, value: Value) {
            self.id = value;
        }

        fn field_values(&self) -> Vec<(&'static str, Value)> {
            vec![
                ("id", self.id.clone()),
                ("handle", Value::from(self.handle.clone())),
                ("email", Value::from(self.email.clone())),
                ("bio", Value::from(self.bio.clone())),
            ]
        }

        fn from_row(row: &Row) -> Result<Self, DbError> {
            Ok(Self {
                id: row.get("id")?,
                handle: row.get("handle")?,
                email: row.get("email")?,
                bio: row.get("bio")?,
            })
        }
    }

    impl NullCheckerModel for Profile {}

    fn profile(handle: Option<&str>, email: Option<&str>, bio: Option<&str>) -> Profile {
        Profile {
            id: Value::Null,
            handle: handle.map(str::to_string),
            email: email.map(str::to_string),
            bio: bio.map(str::to_string),
        }
    }

    #[test]
    fn test_is_marked_exact_variants_only() {
        for kind in NULLABLE_KINDS {
            assert!(is_marked(&FieldType::nullable(kind)), "{kind:?}");
        }
        assert!(!is_marked(&FieldType::CharField));
        assert!(!is_marked(&FieldType::EmailField));
        assert!(!is_marked(&FieldType::custom(
            "CompanyEmailField",
            FieldType::nullable(NullableKind::Email)
        )));
    }

    #[test]
    fn test_check_passes_when_all_marked_set() {
        let p = profile(Some("ann"), Some("ann@example.com"), Some("hello"));
        assert!(p.check_nulls().is_ok());
    }

    #[test]
    fn test_check_reports_table_and_field() {
        let p = profile(None, Some("ann@example.com"), Some("hi"));
        let err = p.check_nulls().unwrap_err();
        assert!(err.is_integrity_error());
        assert_eq!(err.to_string(), "accounts_profile.handle may not be null");
    }

    #[test]
    fn test_check_reports_first_in_declaration_order() {
        let p = profile(None, None, None);
        let err = check_null_fields(&p).unwrap_err();
        assert_eq!(err.to_string(), "accounts_profile.handle may not be null");
    }

    #[test]
    fn test_empty_string_is_not_null() {
        let p = profile(Some(""), Some(""), None);
        assert!(check_null_fields(&p).is_ok());
    }

    #[test]
    fn test_unmarked_null_is_ignored() {
        let p = profile(Some("ann"), Some("ann@example.com"), None);
        assert!(check_null_fields(&p).is_ok());
    }

    #[test]
    fn test_marked_defaults_are_null() {
        let defaults = Profile::marked_defaults();
        assert_eq!(
            defaults,
            vec![("handle", Value::Null), ("email", Value::Null)]
        );
    }

    struct Sparse;

    impl Model for Sparse {
        fn meta() -> &'static ModelMeta {
            use std::sync::LazyLock;
            static META: LazyLock<ModelMeta> = LazyLock::new(|| {
                ModelMeta::new("misc", "sparse", vec![nullable_field("marker")]).db_table("sparse")
            });
            &META
        }

        fn pk(&self) -> Option<&Value> {
            None
        }

        fn set_pk(&mut self, _value: Value) {}

        fn field_values(&self) -> Vec<(&'static str, Value)> {
            Vec::new()
        }

        fn from_row(_row: &Row) -> Result<Self, DbError> {
            Ok(Self)
        }
    }

    #[test]
    fn test_missing_value_counts_as_null() {
        let err = check_null_fields(&Sparse).unwrap_err();
        assert_eq!(err.to_string(), "sparse.marker may not be null");
    }
}
