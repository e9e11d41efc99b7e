//! Thin statement and metadata helpers over an [`AsyncDatabaseExecutor`].
//!
//! Each runs a single statement. Outcomes are logged; errors are logged and
//! returned, except for the boolean existence checks which report `false`.

use crate::error::DbaseError;
use crate::executor::AsyncDatabaseExecutor;
use crate::helpers::{check_identifier, sanitize_whitespace};
use crate::results::ResultSet;
use crate::types::{DmlOutcome, RowValues};

const CURRENT_USER_QUERY: &str = "SELECT CURRENT_USER()";

const FIELD_NAMES_QUERY: &str = "SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS \
     WHERE TABLE_SCHEMA=? AND TABLE_NAME=? ORDER BY ORDINAL_POSITION";

/// Prepare and execute a DML statement.
///
/// # Errors
/// Returns the driver error.
pub async fn exec<E>(executor: &E, sql: &str, params: &[RowValues]) -> Result<DmlOutcome, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    executor.execute_dml(sql, params).await.inspect_err(|err| {
        tracing::error!(outcome = "exec_failed", error = %err, "statement failed");
    })
}

/// Run a SELECT and return its rows.
///
/// # Errors
/// Returns the driver error.
pub async fn query<E>(executor: &E, sql: &str, params: &[RowValues]) -> Result<ResultSet, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    executor.execute_select(sql, params).await.inspect_err(|err| {
        tracing::error!(outcome = "query_failed", error = %err, "query failed");
    })
}

/// Delete row `id` from `table`, returning the number of rows affected.
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid table name and
/// `DbaseError::StatementError` when the delete fails.
pub async fn delete_row<E>(executor: &E, table: &str, id: i64) -> Result<u64, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    check_identifier("table", table)?;
    let sql = format!("DELETE FROM {table} WHERE id=?");
    match executor.execute_dml(&sql, &[RowValues::Int(id)]).await {
        Ok(outcome) => {
            tracing::info!(
                outcome = "deleted",
                table,
                id,
                rows_affected = outcome.rows_affected,
                "delete row"
            );
            Ok(outcome.rows_affected)
        }
        Err(err) => {
            tracing::error!(outcome = "delete_failed", table, id, error = %err, "could not delete row");
            Err(DbaseError::statement(table, &["id".to_string()], err))
        }
    }
}

/// Name of the current default schema, `None` when none is selected.
///
/// # Errors
/// Returns the driver error.
pub async fn get_database_name<E>(executor: &E) -> Result<Option<String>, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    let result = query(executor, "SELECT DATABASE()", &[]).await?;
    Ok(result
        .first_value()
        .and_then(RowValues::as_text)
        .map(str::to_string))
}

/// The account the server authenticated this login as, e.g. `app@%`.
///
/// # Errors
/// Returns the driver error.
pub async fn current_user<E>(executor: &E) -> Result<String, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    let result = executor.execute_select(CURRENT_USER_QUERY, &[]).await?;
    Ok(result
        .first_value()
        .and_then(RowValues::as_text)
        .unwrap_or_default()
        .to_string())
}

/// Every schema name visible to the login.
///
/// # Errors
/// Returns the driver error.
pub async fn get_database_names<E>(executor: &E) -> Result<Vec<String>, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    let result = query(executor, "SHOW DATABASES", &[]).await?;
    Ok(result.first_column_text())
}

/// Column names of `database.table` in ordinal order.
///
/// # Errors
/// Returns the driver error.
pub async fn get_field_names<E>(
    executor: &E,
    database: &str,
    table: &str,
) -> Result<Vec<String>, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    let params = [RowValues::from(database), RowValues::from(table)];
    let result = query(executor, FIELD_NAMES_QUERY, &params).await?;
    Ok(result.first_column_text())
}

/// Whether a schema called `name` exists. Lookup failures count as absent.
pub async fn database_exists<E>(executor: &E, name: &str) -> bool
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    get_database_names(executor)
        .await
        .is_ok_and(|names| names.iter().any(|n| n == name))
}

/// Whether `name` can be selected from. Any failure counts as absent.
pub async fn table_exists<E>(executor: &E, name: &str) -> bool
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    if check_identifier("table", name).is_err() {
        return false;
    }
    executor
        .execute_select(&format!("SELECT 1 FROM {name} LIMIT 1"), &[])
        .await
        .is_ok()
}

/// Create `name` from a free-form column definition unless it already exists.
///
/// The definition is whitespace-normalized before it is sent.
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid name and
/// `DbaseError::StatementError` when the statement fails.
pub async fn create_table<E>(executor: &E, name: &str, definition: &str) -> Result<(), DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    check_identifier("table", name)?;
    let definition = sanitize_whitespace(definition);
    if table_exists(executor, name).await {
        tracing::debug!(table = name, "table already exists");
        return Ok(());
    }

    let sql = format!("CREATE TABLE {name} ( {} )", definition.trim());
    match executor.execute_batch(&sql).await {
        Ok(()) => {
            tracing::info!(outcome = "created", table = name, "CREATE TABLE");
            Ok(())
        }
        Err(err) => {
            tracing::error!(outcome = "create_failed", table = name, error = %err, "CREATE TABLE failed");
            Err(DbaseError::statement(name, &[], err))
        }
    }
}

/// Create schema `name`.
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid name, otherwise the
/// driver error.
pub async fn create_database<E>(executor: &E, name: &str) -> Result<(), DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    check_identifier("database", name)?;
    executor
        .execute_batch(&format!("CREATE DATABASE {name}"))
        .await
        .inspect(|_| tracing::info!(outcome = "created", database = name, "CREATE DATABASE"))
        .inspect_err(|err| {
            tracing::error!(outcome = "create_failed", database = name, error = %err, "CREATE DATABASE failed");
        })
}

/// Make `name` the default schema unless it already is.
///
/// `USE` applies to the connection that runs it. Pass a [`MySqlSession`] so
/// later statements on the same session see the new schema; on a bare pool
/// the choice lands on whichever pooled connection ran it.
///
/// [`MySqlSession`]: crate::mysql::MySqlSession
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid name, otherwise the
/// driver error.
pub async fn use_database<E>(executor: &E, name: &str) -> Result<(), DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    check_identifier("database", name)?;
    if get_database_name(executor).await?.as_deref() == Some(name) {
        return Ok(());
    }
    executor
        .execute_batch(&format!("USE {name}"))
        .await
        .inspect(|_| tracing::info!(outcome = "use", database = name, "USE"))
        .inspect_err(|err| {
            tracing::error!(outcome = "use_failed", database = name, error = %err, "USE command has failed");
        })
}
