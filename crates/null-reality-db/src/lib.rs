//! # null-reality-db
//!
//! Model and field utilities that make text fields respect `null = false`.
//!
//! By default the ORM's text family (`CharField`, `TextField`, ...) fills a
//! missing value with an empty string, so a non-nullable text column can
//! never trip an integrity error. This crate provides null-respecting
//! variants of those fields and a save path that rejects NULL in them:
//!
//! ```text
//! IntegrityError: article.title may not be null
//! ```
//!
//! ## Module Overview
//!
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`fields`] - Field definitions, including the [`nullable`](fields::nullable) variants
//! - [`validators`] - Validators of the text family
//! - [`model`] - The [`Model`](model::Model) trait and [`ModelMeta`](model::ModelMeta)
//! - [`query`] - SQL compilation for model writes
//! - [`executor`] - The [`DbExecutor`](executor::DbExecutor) trait and save functions
//! - [`null_checker`] - The save-time NULL check

// - struct_excessive_bools: FieldDef and SaveOptions carry several flags by nature
// - doc_markdown: backtick requirements for documentation items are too strict
// - missing_const_for_fn: builder methods are not meant to be const
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]

pub mod executor;
pub mod fields;
pub mod model;
pub mod null_checker;
pub mod query;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use executor::{
    create_model, refresh_model, save_model, save_model_with, save_model_with_hooks, DbExecutor,
    ModelLifecycleHooks, SaveOptions, SaveOutcome,
};
pub use fields::{
    nullable_char_field, nullable_comma_separated_integer_field, nullable_email_field,
    nullable_field, nullable_slug_field, nullable_text_field, nullable_url_field, DefaultPolicy,
    FieldDef, FieldType, NullableKind, NULLABLE_KINDS,
};
pub use model::{full_clean, Model, ModelMeta};
pub use null_checker::{
    check_null_fields, create_null_checked, is_marked, save_null_checked, save_null_checked_with,
    NullCheckerModel,
};
pub use query::{DatabaseBackendType, Row, SqlCompiler};
pub use validators::Validator;
pub use value::Value;
