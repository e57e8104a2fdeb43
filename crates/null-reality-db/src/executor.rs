//! Database executor trait and model persistence.
//!
//! [`DbExecutor`] is the minimal async interface a database backend
//! implements. The free functions here save, create, and refresh model
//! instances through it. [`ModelLifecycleHooks`] lets a model run code
//! around a save.

use crate::model::Model;
use crate::query::{DatabaseBackendType, Row, SqlCompiler};
use crate::value::Value;
use null_reality_core::{DbError, DbResult};

/// Minimal async database executor trait.
///
/// Persistence functions accept `&dyn DbExecutor`, which backends implement.
#[async_trait::async_trait]
pub trait DbExecutor: Send + Sync {
    /// Returns the backend type for SQL compilation.
    fn backend_type(&self) -> DatabaseBackendType;

    /// Runs a SQL statement that does not return rows.
    /// Returns the number of rows affected.
    async fn execute_sql(&self, sql: &str, params: &[Value]) -> DbResult<u64>;

    /// Runs a SQL query and returns all result rows.
    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Row>>;

    /// Runs a SQL query and returns exactly one row.
    async fn query_one(&self, sql: &str, params: &[Value]) -> DbResult<Row> {
        let mut rows = self.query(sql, params).await?.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            (None, _) => Err(DbError::DoesNotExist(sql.to_string())),
            (Some(_), Some(_)) => Err(DbError::DatabaseError(format!(
                "Query returned more than one row: {sql}"
            ))),
        }
    }

    /// Executes an INSERT and returns the last inserted row ID.
    ///
    /// The default runs the insert and then asks the backend for the last
    /// generated ID. Backends with `RETURNING` support should override it.
    async fn insert_returning_id(&self, sql: &str, params: &[Value]) -> DbResult<Value> {
        self.execute_sql(sql, params).await?;
        let last_id_sql = match self.backend_type() {
            DatabaseBackendType::PostgreSQL => "SELECT LASTVAL() AS id",
            DatabaseBackendType::SQLite => "SELECT last_insert_rowid() AS id",
            DatabaseBackendType::MySQL => "SELECT LAST_INSERT_ID() AS id",
        };
        let row = self.query_one(last_id_sql, &[]).await?;
        row.get::<Value>("id")
    }
}

/// Options forwarded to a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Always INSERT, even when the instance has a primary key.
    pub force_insert: bool,
    /// Always UPDATE; fail if no row was updated.
    pub force_update: bool,
    /// Restrict an UPDATE to these fields. An empty list makes the save a no-op.
    pub update_fields: Option<Vec<&'static str>>,
}

impl SaveOptions {
    /// Options forcing an INSERT.
    pub fn insert() -> Self {
        Self {
            force_insert: true,
            ..Self::default()
        }
    }

    /// Options forcing an UPDATE.
    pub fn update() -> Self {
        Self {
            force_update: true,
            ..Self::default()
        }
    }

    /// Options restricting an UPDATE to the given fields.
    pub fn update_fields(fields: &[&'static str]) -> Self {
        Self {
            update_fields: Some(fields.to_vec()),
            ..Self::default()
        }
    }
}

/// What a save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new row was inserted.
    Inserted,
    /// An existing row was updated.
    Updated,
    /// Nothing was written (empty `update_fields`).
    Skipped,
}

/// Optional lifecycle hooks for model saves.
///
/// All methods have default no-op implementations.
pub trait ModelLifecycleHooks: Model {
    /// Called before a save. Return `Err` to abort it.
    fn on_pre_save(&self) -> DbResult<()> {
        Ok(())
    }

    /// Called after a successful save.
    fn on_post_save(&self) {}
}

// ── Model persistence free functions ───────────────────────────────────

/// Saves a model instance with default options.
///
/// An instance with a primary key is UPDATEd; one without is INSERTed and
/// gets its primary key set from the database.
pub async fn save_model<M: Model>(model: &mut M, db: &dyn DbExecutor) -> DbResult<SaveOutcome> {
    save_model_with(model, db, &SaveOptions::default()).await
}

/// Saves a model instance with explicit options.
///
/// An UPDATE that touches no rows falls back to an INSERT carrying the
/// instance's primary key, unless the update was forced.
///
/// # Errors
///
/// Returns `DatabaseError` for contradictory options, for a forced update
/// without a primary key or that updates nothing, for unknown
/// `update_fields`, and for any executor failure.
pub async fn save_model_with<M: Model>(
    model: &mut M,
    db: &dyn DbExecutor,
    options: &SaveOptions,
) -> DbResult<SaveOutcome> {
    if options.force_insert && (options.force_update || options.update_fields.is_some()) {
        return Err(DbError::DatabaseError(
            "Cannot force both insert and updating in model saving.".to_string(),
        ));
    }

    let forced_update = options.force_update || options.update_fields.is_some();
    let table = M::table_name();
    let compiler = SqlCompiler::new(db.backend_type());

    let fields = match &options.update_fields {
        Some(names) if names.is_empty() => {
            tracing::debug!(table, "empty update_fields; skipping save");
            return Ok(SaveOutcome::Skipped);
        }
        Some(names) => select_update_fields(model, names)?,
        None => model.non_pk_field_values(),
    };

    let pk = model.pk().cloned();
    if forced_update && pk.is_none() {
        return Err(DbError::DatabaseError(
            "Cannot force an update in save() with no primary key.".to_string(),
        ));
    }

    if let (Some(pk), false) = (pk, options.force_insert) {
        let (sql, params) = compiler.compile_update(table, &fields, M::pk_field_name(), &pk);
        let updated = db.execute_sql(&sql, &params).await?;
        if updated > 0 {
            tracing::debug!(table, rows = updated, "updated model");
            return Ok(SaveOutcome::Updated);
        }
        if forced_update {
            return Err(DbError::DatabaseError(
                "Forced update did not affect any rows.".to_string(),
            ));
        }
        let (sql, params) = compiler.compile_insert(table, &model.field_values());
        db.execute_sql(&sql, &params).await?;
        tracing::debug!(table, "inserted model with existing primary key");
        return Ok(SaveOutcome::Inserted);
    }

    if model.pk().is_some() {
        // Forced insert of an instance that already has its key.
        let (sql, params) = compiler.compile_insert(table, &model.field_values());
        db.execute_sql(&sql, &params).await?;
    } else {
        let (sql, params) = compiler.compile_insert(table, &fields);
        let pk = db.insert_returning_id(&sql, &params).await?;
        model.set_pk(pk);
    }
    tracing::debug!(table, "inserted model");
    Ok(SaveOutcome::Inserted)
}

fn select_update_fields<M: Model>(
    model: &M,
    names: &[&'static str],
) -> DbResult<Vec<(&'static str, Value)>> {
    let pk_name = M::pk_field_name();
    let unknown: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| *name == pk_name || M::meta().get_field(name).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(DbError::DatabaseError(format!(
            "The following fields do not exist in this model, are primary keys, or cannot be updated: {}",
            unknown.join(", ")
        )));
    }
    Ok(model
        .non_pk_field_values()
        .into_iter()
        .filter(|(name, _)| names.contains(name))
        .collect())
}

/// Saves a model with lifecycle hooks.
///
/// Calls `on_pre_save` before and `on_post_save` after the operation.
pub async fn save_model_with_hooks<M: ModelLifecycleHooks>(
    model: &mut M,
    db: &dyn DbExecutor,
) -> DbResult<SaveOutcome> {
    model.on_pre_save()?;
    let outcome = save_model(model, db).await?;
    model.on_post_save();
    Ok(outcome)
}

/// Creates a new model instance in the database via INSERT.
pub async fn create_model<M: Model>(model: &mut M, db: &dyn DbExecutor) -> DbResult<SaveOutcome> {
    save_model_with(model, db, &SaveOptions::insert()).await
}

/// Reloads a model instance from the database by primary key.
///
/// # Errors
///
/// Returns an error if the PK is not set or the record does not exist.
pub async fn refresh_model<M: Model>(model: &mut M, db: &dyn DbExecutor) -> DbResult<()> {
    let pk = model.pk().cloned().ok_or_else(|| {
        DbError::DatabaseError("Cannot refresh a model without a primary key".to_string())
    })?;
    let compiler = SqlCompiler::new(db.backend_type());
    let (sql, params) = compiler.compile_select_by_pk(M::table_name(), M::pk_field_name(), &pk);
    let row = db.query_one(&sql, &params).await?;
    *model = M::from_row(&row)?;
    Ok(())
}
