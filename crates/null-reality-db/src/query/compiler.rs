//! SQL compilation for model writes.
//!
//! [`SqlCompiler`] turns field/value pairs into parameterized INSERT, UPDATE,
//! and SELECT-by-pk statements using the placeholder style of the target
//! backend. Values never appear in the SQL text.

use crate::value::Value;
use null_reality_core::DbError;

/// The database backend a statement is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseBackendType {
    /// PostgreSQL (uses `$1, $2, ...` placeholders).
    PostgreSQL,
    /// SQLite (uses `?` placeholders).
    SQLite,
    /// MySQL (uses `?` placeholders).
    MySQL,
}

impl DatabaseBackendType {
    /// Maps a settings engine name (e.g. `"postgresql"`) to a backend type.
    ///
    /// Dotted engine paths are accepted; only the last segment is matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use null_reality_db::query::DatabaseBackendType;
    ///
    /// assert_eq!(
    ///     DatabaseBackendType::from_engine("backends.postgresql").unwrap(),
    ///     DatabaseBackendType::PostgreSQL
    /// );
    /// assert!(DatabaseBackendType::from_engine("oracle").is_err());
    /// ```
    pub fn from_engine(engine: &str) -> Result<Self, DbError> {
        let name = engine.rsplit('.').next().unwrap_or(engine);
        match name.to_lowercase().as_str() {
            "postgresql" | "postgres" | "postgresql_psycopg2" => Ok(Self::PostgreSQL),
            "sqlite" | "sqlite3" => Ok(Self::SQLite),
            "mysql" => Ok(Self::MySQL),
            _ => Err(DbError::ConfigurationError(format!(
                "Unsupported database engine '{engine}'"
            ))),
        }
    }
}

/// A database row used to construct model instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row from column names and values.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns does not match the number of values.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        assert_eq!(
            columns.len(),
            values.len(),
            "Row column count must match value count"
        );
        Self { columns, values }
    }

    /// Builds a row from field name-value pairs.
    pub fn from_pairs(pairs: &[(&str, Value)]) -> Self {
        let (columns, values) = pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .unzip();
        Self { columns, values }
    }

    /// Returns the column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Gets a typed value by column name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column does not exist or the value cannot be
    /// converted to the requested type.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T, DbError> {
        let value = self.get_value(column).ok_or_else(|| {
            DbError::DatabaseError(format!("Column '{column}' not found in row"))
        })?;
        T::from_value(value)
    }

    /// Returns a reference to the raw Value at the given column name.
    pub fn get_value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }
}

/// Trait for converting a [`Value`] to a concrete Rust type.
pub trait FromValue: Sized {
    /// Attempts to convert a value reference to this type.
    fn from_value(value: &Value) -> Result<Self, DbError>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, DbError> {
        match value {
            Value::Int(i) => Ok(*i),
            _ => Err(DbError::DatabaseError(format!(
                "Expected Int, got {value:?}"
            ))),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, DbError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(DbError::DatabaseError(format!(
                "Expected Bool, got {value:?}"
            ))),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, DbError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(DbError::DatabaseError(format!(
                "Expected String, got {value:?}"
            ))),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, DbError> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, DbError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Compiles model writes into SQL for a specific backend.
#[derive(Debug, Clone, Copy)]
pub struct SqlCompiler {
    backend: DatabaseBackendType,
}

impl SqlCompiler {
    /// Creates a compiler for the given backend.
    pub const fn new(backend: DatabaseBackendType) -> Self {
        Self { backend }
    }

    /// Returns the backend this compiler targets.
    pub const fn backend(&self) -> DatabaseBackendType {
        self.backend
    }

    fn placeholder(&self, index: usize) -> String {
        match self.backend {
            DatabaseBackendType::PostgreSQL => format!("${index}"),
            DatabaseBackendType::SQLite | DatabaseBackendType::MySQL => "?".to_string(),
        }
    }

    /// Compiles an INSERT statement.
    pub fn compile_insert(&self, table: &str, fields: &[(&str, Value)]) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let columns: Vec<String> = fields.iter().map(|(name, _)| format!("\"{name}\"")).collect();
        let placeholders: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (_, val))| {
                params.push(val.clone());
                self.placeholder(i + 1)
            })
            .collect();

        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );

        (sql, params)
    }

    /// Compiles an UPDATE of `fields` for the row whose `pk_column` equals `pk`.
    pub fn compile_update(
        &self,
        table: &str,
        fields: &[(&str, Value)],
        pk_column: &str,
        pk: &Value,
    ) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let set_parts: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (name, val))| {
                params.push(val.clone());
                let ph = self.placeholder(i + 1);
                format!("\"{name}\" = {ph}")
            })
            .collect();

        params.push(pk.clone());
        let pk_ph = self.placeholder(params.len());
        let sql = format!(
            "UPDATE \"{}\" SET {} WHERE \"{pk_column}\" = {pk_ph}",
            table,
            set_parts.join(", ")
        );

        (sql, params)
    }

    /// Compiles a SELECT of a single row by primary key.
    pub fn compile_select_by_pk(
        &self,
        table: &str,
        pk_column: &str,
        pk: &Value,
    ) -> (String, Vec<Value>) {
        let ph = self.placeholder(1);
        (
            format!("SELECT * FROM \"{table}\" WHERE \"{pk_column}\" = {ph} LIMIT 1"),
            vec![pk.clone()],
        )
    }
}
