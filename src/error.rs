use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbaseError {
    #[error(transparent)]
    MysqlError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A prepare or execute failure, tagged with the table and the columns the
    /// statement touched.
    #[error("Statement error on table [ {table} ] columns {columns:?}: {source}")]
    StatementError {
        table: String,
        columns: Vec<String>,
        #[source]
        source: Box<DbaseError>,
    },

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl DbaseError {
    pub(crate) fn statement(table: &str, columns: &[String], source: DbaseError) -> Self {
        DbaseError::StatementError {
            table: table.to_string(),
            columns: columns.to_vec(),
            source: Box::new(source),
        }
    }

    /// Table named by a `StatementError`, if this is one.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            DbaseError::StatementError { table, .. } => Some(table),
            _ => None,
        }
    }
}
