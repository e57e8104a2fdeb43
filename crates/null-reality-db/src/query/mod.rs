//! Query compilation.
//!
//! Only the statements model persistence needs are compiled here; see
//! [`SqlCompiler`].

pub mod compiler;

pub use compiler::{DatabaseBackendType, FromValue, Row, SqlCompiler};
