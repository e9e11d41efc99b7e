use async_trait::async_trait;
use sqlx::MySqlPool;

use super::params::bind_params;
use super::query::build_result_set;
use crate::error::DbaseError;
use crate::executor::AsyncDatabaseExecutor;
use crate::results::ResultSet;
use crate::types::{DmlOutcome, RowValues};

/// The pool is the handle; statements and cursors are checked out per call
/// and released when the driver future completes or is dropped.
#[async_trait]
impl AsyncDatabaseExecutor for MySqlPool {
    async fn execute_batch(&self, query: &str) -> Result<(), DbaseError> {
        sqlx::raw_sql(query).execute(self).await?;
        Ok(())
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, DbaseError> {
        let rows = bind_params(sqlx::query(query), params)
            .fetch_all(self)
            .await?;
        build_result_set(&rows)
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<DmlOutcome, DbaseError> {
        let result = bind_params(sqlx::query(query), params)
            .execute(self)
            .await?;
        Ok(DmlOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }
}
