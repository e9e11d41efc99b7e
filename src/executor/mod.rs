//! The driver boundary.
//!
//! Everything above this trait composes SQL text and bound values; everything
//! below it talks to the server. The MySQL handle implements it in
//! [`crate::mysql::executor`].

use async_trait::async_trait;

use crate::error::DbaseError;
use crate::results::ResultSet;
use crate::types::{DmlOutcome, QueryAndParams, RowValues};

#[async_trait]
pub trait AsyncDatabaseExecutor: Send + Sync {
    /// Executes an unprepared statement over the text protocol. No parameters
    /// are supported; used for `USE` and DDL.
    async fn execute_batch(&self, query: &str) -> Result<(), DbaseError>;

    /// Prepares and runs a single SELECT statement and returns the result set.
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, DbaseError>;

    /// Prepares and runs a single DML statement (INSERT, UPDATE, DELETE, etc.).
    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<DmlOutcome, DbaseError>;

    /// Runs a composed statement as DML.
    async fn execute_query_and_params(
        &self,
        statement: &QueryAndParams,
    ) -> Result<DmlOutcome, DbaseError> {
        self.execute_dml(&statement.query, &statement.params).await
    }
}
