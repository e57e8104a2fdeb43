//! # null-reality-core
//!
//! Foundation types shared by the null-reality crates: the error enum, the
//! settings struct and its loaders, and `tracing` setup.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Library settings with defaults
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{DbError, DbResult, ValidationError};
pub use settings::{DatabaseSettings, Settings};
