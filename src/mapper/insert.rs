use super::column_name;
use crate::error::DbaseError;
use crate::executor::AsyncDatabaseExecutor;
use crate::helpers::check_identifier;
use crate::record::Record;
use crate::types::{QueryAndParams, RowValues};

/// Compose `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` for `record`.
///
/// Column names and bound values come from the same pairs, so their order
/// always matches.
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid table or column name,
/// or a record with no columns.
pub fn insert_statement<R: Record + ?Sized>(
    table: &str,
    record: &R,
) -> Result<QueryAndParams, DbaseError> {
    check_identifier("table", table)?;
    let pairs = record.columns();
    if pairs.is_empty() {
        return Err(DbaseError::ParameterError(format!(
            "record for table [ {table} ] has no columns"
        )));
    }

    let mut columns = Vec::with_capacity(pairs.len());
    let mut params: Vec<RowValues> = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        columns.push(column_name(name)?);
        params.push(value);
    }
    let placeholders = vec!["?"; columns.len()].join(",");
    let query = format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(",")
    );
    Ok(QueryAndParams::new(query, params))
}

/// Insert `record` into `table` and return the server-assigned id.
///
/// A `None` record issues nothing and returns `0`.
///
/// # Errors
/// Returns `DbaseError::ParameterError` from composition and
/// `DbaseError::StatementError` naming the table when the insert fails.
pub async fn insert_row<E, R>(
    executor: &E,
    table: &str,
    record: Option<&R>,
) -> Result<i64, DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
    R: Record + ?Sized,
{
    let Some(record) = record else {
        return Ok(0);
    };
    let statement = insert_statement(table, record)?;
    tracing::debug!(table, query = %statement.query, "insert");

    let outcome = match executor.execute_query_and_params(&statement).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let columns = statement_columns(record);
            tracing::error!(outcome = "insert_failed", table, error = %err, "insert row failed");
            return Err(DbaseError::statement(table, &columns, err));
        }
    };
    let id = i64::try_from(outcome.last_insert_id).map_err(|e| {
        DbaseError::ParameterError(format!("insert id {} out of range: {e}", outcome.last_insert_id))
    })?;
    tracing::info!(
        outcome = "inserted",
        table,
        rows_affected = outcome.rows_affected,
        columns = statement.params.len(),
        id,
        "inserted row"
    );
    Ok(id)
}

fn statement_columns<R: Record + ?Sized>(record: &R) -> Vec<String> {
    record
        .columns()
        .into_iter()
        .map(|(name, _)| name.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        qty: i64,
    }

    impl Record for Item {
        fn columns(&self) -> Vec<(&'static str, RowValues)> {
            vec![("Name", self.name.into()), ("Qty", self.qty.into())]
        }
    }

    struct Empty;

    impl Record for Empty {
        fn columns(&self) -> Vec<(&'static str, RowValues)> {
            Vec::new()
        }
    }

    #[test]
    fn composes_insert_in_declaration_order() {
        let stmt = insert_statement("items", &Item { name: "a", qty: 7 }).unwrap();
        assert_eq!(stmt.query, "INSERT INTO items (name,qty) VALUES (?,?)");
        assert_eq!(
            stmt.params,
            vec![RowValues::Text("a".into()), RowValues::Int(7)]
        );
    }

    #[test]
    fn placeholder_count_matches_columns() {
        let stmt = insert_statement("shop.items", &Item { name: "b", qty: 1 }).unwrap();
        assert_eq!(stmt.query.matches('?').count(), stmt.params.len());
        assert!(stmt.query.starts_with("INSERT INTO shop.items "));
    }

    #[test]
    fn empty_record_is_rejected() {
        let err = insert_statement("items", &Empty).unwrap_err();
        assert!(matches!(err, DbaseError::ParameterError(_)));
    }

    #[test]
    fn bad_table_is_rejected() {
        let err = insert_statement("items (x) --", &Item { name: "a", qty: 1 }).unwrap_err();
        assert!(matches!(err, DbaseError::ParameterError(_)));
    }
}
