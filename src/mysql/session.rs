use std::sync::Arc;

use async_trait::async_trait;
use sqlx::MySql;
use sqlx::MySqlPool;
use sqlx::pool::PoolConnection;
use tokio::sync::Mutex;

use super::params::bind_params;
use super::query::build_result_set;
use crate::error::DbaseError;
use crate::executor::AsyncDatabaseExecutor;
use crate::results::ResultSet;
use crate::types::{DmlOutcome, RowValues};

/// One pooled connection held for a sequence of statements.
///
/// Session state such as the default schema chosen by `USE` stays with the
/// connection, so every statement issued through the same session sees it.
/// The connection goes back to the pool when the last clone is dropped.
#[derive(Clone)]
pub struct MySqlSession {
    connection: Arc<Mutex<PoolConnection<MySql>>>,
}

impl MySqlSession {
    /// Check a connection out of `pool` and pin it.
    ///
    /// # Errors
    /// Returns the driver error when no connection can be acquired within the
    /// pool's acquire timeout.
    pub async fn acquire(pool: &MySqlPool) -> Result<Self, DbaseError> {
        let connection = pool.acquire().await?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }
}

impl std::fmt::Debug for MySqlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlSession")
            .field("connection", &"<PoolConnection<MySql>>")
            .finish()
    }
}

#[async_trait]
impl AsyncDatabaseExecutor for MySqlSession {
    async fn execute_batch(&self, query: &str) -> Result<(), DbaseError> {
        let mut connection = self.connection.lock().await;
        sqlx::Executor::execute(&mut **connection, sqlx::raw_sql(query)).await?;
        Ok(())
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, DbaseError> {
        let mut connection = self.connection.lock().await;
        let rows = bind_params(sqlx::query(query), params)
            .fetch_all(&mut **connection)
            .await?;
        build_result_set(&rows)
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<DmlOutcome, DbaseError> {
        let mut connection = self.connection.lock().await;
        let result = bind_params(sqlx::query(query), params)
            .execute(&mut **connection)
            .await?;
        Ok(DmlOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }
}
