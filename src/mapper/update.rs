use std::collections::BTreeMap;

use super::column_name;
use crate::error::DbaseError;
use crate::executor::AsyncDatabaseExecutor;
use crate::helpers::check_identifier;
use crate::types::{QueryAndParams, RowValues};

/// New values for an UPDATE, keyed by lower-cased column name.
///
/// Columns are kept sorted so the same set always yields the same SQL text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFieldSet {
    fields: BTreeMap<String, RowValues>,
}

impl UpdateFieldSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`, replacing any earlier value for it.
    pub fn set(&mut self, column: &str, value: impl Into<RowValues>) -> &mut Self {
        self.fields.insert(column.to_lowercase(), value.into());
        self
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<RowValues>) -> Self {
        self.set(column, value);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<RowValues>> FromIterator<(K, V)> for UpdateFieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = UpdateFieldSet::new();
        for (column, value) in iter {
            set.set(column.as_ref(), value);
        }
        set
    }
}

/// Compose `UPDATE <table> SET <col>=?, ... WHERE id=?` with the row id bound last.
///
/// Returns `Ok(None)` for an empty field set.
///
/// # Errors
/// Returns `DbaseError::ParameterError` for an invalid table or column name.
pub fn update_statement(
    table: &str,
    id: i64,
    fields: &UpdateFieldSet,
) -> Result<Option<QueryAndParams>, DbaseError> {
    if fields.is_empty() {
        return Ok(None);
    }
    check_identifier("table", table)?;

    let mut assignments = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len() + 1);
    for (column, value) in &fields.fields {
        assignments.push(format!("{}=?", column_name(column)?));
        params.push(value.clone());
    }
    params.push(RowValues::Int(id));

    let query = format!("UPDATE {table} SET {} WHERE id=?", assignments.join(", "));
    Ok(Some(QueryAndParams::new(query, params)))
}

/// Update row `id` of `table` with `fields`.
///
/// A `None` or empty field set issues nothing.
///
/// # Errors
/// Returns `DbaseError::ParameterError` from composition and
/// `DbaseError::StatementError` carrying the table and attempted columns when
/// the update fails.
pub async fn update_row<E>(
    executor: &E,
    table: &str,
    id: i64,
    fields: Option<&UpdateFieldSet>,
) -> Result<(), DbaseError>
where
    E: AsyncDatabaseExecutor + ?Sized,
{
    let Some(fields) = fields else {
        return Ok(());
    };
    let Some(statement) = update_statement(table, id, fields)? else {
        return Ok(());
    };
    tracing::debug!(table, query = %statement.query, "update");

    match executor.execute_query_and_params(&statement).await {
        Ok(outcome) => {
            tracing::info!(
                outcome = "updated",
                table,
                id,
                rows_affected = outcome.rows_affected,
                columns = fields.len(),
                "updated row"
            );
            Ok(())
        }
        Err(err) => {
            let columns: Vec<String> = fields.columns().map(str::to_string).collect();
            tracing::error!(
                outcome = "update_failed",
                table,
                id,
                columns = ?columns,
                error = %err,
                "could not update row"
            );
            Err(DbaseError::statement(table, &columns, err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_single_column_update() {
        let fields = UpdateFieldSet::new().with("Qty", 3);
        let stmt = update_statement("items", 5, &fields).unwrap().unwrap();
        assert_eq!(stmt.query, "UPDATE items SET qty=? WHERE id=?");
        assert_eq!(stmt.params, vec![RowValues::Int(3), RowValues::Int(5)]);
    }

    #[test]
    fn columns_are_sorted_and_id_is_last() {
        let fields: UpdateFieldSet = [
            ("Qty", RowValues::Int(3)),
            ("name", RowValues::Text("bolt".into())),
            ("Active", RowValues::Bool(true)),
        ]
        .into_iter()
        .collect();
        let stmt = update_statement("items", 9, &fields).unwrap().unwrap();
        assert_eq!(
            stmt.query,
            "UPDATE items SET active=?, name=?, qty=? WHERE id=?"
        );
        assert_eq!(
            stmt.params,
            vec![
                RowValues::Bool(true),
                RowValues::Text("bolt".into()),
                RowValues::Int(3),
                RowValues::Int(9),
            ]
        );
    }

    #[test]
    fn same_column_different_case_is_one_assignment() {
        let fields = UpdateFieldSet::new().with("QTY", 1).with("qty", 2);
        assert_eq!(fields.len(), 1);
        let stmt = update_statement("items", 1, &fields).unwrap().unwrap();
        assert_eq!(stmt.params[0], RowValues::Int(2));
    }

    #[test]
    fn empty_set_composes_nothing() {
        assert!(update_statement("items", 1, &UpdateFieldSet::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn empty_set_skips_table_check() {
        assert!(update_statement("bad table", 1, &UpdateFieldSet::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn bad_table_is_rejected_when_there_is_work() {
        let fields = UpdateFieldSet::new().with("qty", 1);
        let err = update_statement("bad table", 1, &fields).unwrap_err();
        assert!(matches!(err, DbaseError::ParameterError(_)));
    }

    #[test]
    fn bad_column_is_rejected() {
        let fields = UpdateFieldSet::new().with("qty=qty+1,name", 1);
        let err = update_statement("items", 1, &fields).unwrap_err();
        assert!(matches!(err, DbaseError::ParameterError(_)));
    }
}
