//! Field definitions and types for the ORM.
//!
//! [`FieldDef`] and [`FieldType`] describe model fields; the [`nullable`]
//! module adds the text-field variants that respect `null = false`.

pub mod nullable;
pub mod types;

pub use nullable::{
    nullable_char_field, nullable_comma_separated_integer_field, nullable_email_field,
    nullable_field, nullable_slug_field, nullable_text_field, nullable_url_field, DefaultPolicy,
    NullableKind, NULLABLE_KINDS,
};
pub use types::{FieldDef, FieldType};
