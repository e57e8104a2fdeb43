//! Text fields that respect `null = false`.
//!
//! The framework's text family normally fills a missing value with an empty
//! string, so a `null = false` column never sees NULL and never raises an
//! integrity error. The variants here keep the storage semantics and
//! validators of the family they wrap, but compute a true NULL default when
//! the field is not nullable:
//!
//! | Constructor | Storage family |
//! |---|---|
//! | [`nullable_char_field`] | `CharField` |
//! | [`nullable_comma_separated_integer_field`] | `CommaSeparatedIntegerField` |
//! | [`nullable_email_field`] | `EmailField` |
//! | [`nullable_slug_field`] | `SlugField` |
//! | [`nullable_text_field`] | `TextField` |
//! | [`nullable_url_field`] | `UrlField` |
//!
//! Use these fields in a model implementing
//! [`NullCheckerModel`](crate::null_checker::NullCheckerModel), so that a
//! NULL still present at save time is rejected before anything is written.

use crate::fields::types::{FieldDef, FieldType};
use crate::value::Value;

/// The closed set of null-respecting field variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NullableKind {
    /// The bare marker with no text family of its own.
    Field,
    /// Wraps `CharField`.
    Char,
    /// Wraps `CommaSeparatedIntegerField`.
    CommaSeparatedInteger,
    /// Wraps `EmailField`.
    Email,
    /// Wraps `SlugField`.
    Slug,
    /// Wraps `TextField`.
    Text,
    /// Wraps `UrlField`.
    Url,
}

/// Every [`NullableKind`], in declaration order.
pub const NULLABLE_KINDS: [NullableKind; 7] = [
    NullableKind::Field,
    NullableKind::Char,
    NullableKind::CommaSeparatedInteger,
    NullableKind::Email,
    NullableKind::Slug,
    NullableKind::Text,
    NullableKind::Url,
];

impl NullableKind {
    /// Returns the standard field type whose storage and validation this
    /// variant delegates to. The bare marker has none.
    pub fn storage(self) -> Option<FieldType> {
        match self {
            Self::Field => None,
            Self::Char => Some(FieldType::CharField),
            Self::CommaSeparatedInteger => Some(FieldType::CommaSeparatedIntegerField),
            Self::Email => Some(FieldType::EmailField),
            Self::Slug => Some(FieldType::SlugField),
            Self::Text => Some(FieldType::TextField),
            Self::Url => Some(FieldType::UrlField),
        }
    }

    /// Returns the type name of this variant.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Field => "NullableField",
            Self::Char => "NullableCharField",
            Self::CommaSeparatedInteger => "NullableCommaSeparatedIntegerField",
            Self::Email => "NullableEmailField",
            Self::Slug => "NullableSlugField",
            Self::Text => "NullableTextField",
            Self::Url => "NullableUrlField",
        }
    }
}

/// How a field computes its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// The framework's behavior: explicit default, else empty string for
    /// the text family, else NULL.
    Framework,
    /// NULL when the field is not nullable; the framework's behavior
    /// otherwise.
    NullRespecting,
}

impl DefaultPolicy {
    /// Computes the default value of `field` under this policy.
    ///
    /// A non-nullable field under [`DefaultPolicy::NullRespecting`] always
    /// gets NULL, even when it declares an explicit default. A nullable one
    /// keeps the framework default, which for the text family is an empty
    /// string rather than NULL.
    pub fn compute(self, field: &FieldDef) -> Value {
        match self {
            Self::NullRespecting if !field.null => Value::Null,
            Self::Framework | Self::NullRespecting => field.framework_default(),
        }
    }
}

/// The bare null-respecting marker field.
pub fn nullable_field(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Field))
}

/// A `CharField` that respects `null = false`.
pub fn nullable_char_field(name: &'static str, max_length: usize) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Char)).max_length(max_length)
}

/// A `CommaSeparatedIntegerField` that respects `null = false`.
pub fn nullable_comma_separated_integer_field(name: &'static str, max_length: usize) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::CommaSeparatedInteger))
        .max_length(max_length)
}

/// An `EmailField` that respects `null = false`.
pub fn nullable_email_field(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Email)).max_length(254)
}

/// A `SlugField` that respects `null = false`.
pub fn nullable_slug_field(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Slug)).max_length(50)
}

/// A `TextField` that respects `null = false`.
pub fn nullable_text_field(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Text))
}

/// A `UrlField` that respects `null = false`.
pub fn nullable_url_field(name: &'static str) -> FieldDef {
    FieldDef::new(name, FieldType::nullable(NullableKind::Url)).max_length(200)
}
