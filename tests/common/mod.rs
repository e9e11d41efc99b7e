#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mysql_middleware::prelude::*;

/// One call seen by the recording executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Batch(String),
    Select(String, Vec<RowValues>),
    Dml(String, Vec<RowValues>),
}

/// Canned reply for the next call.
pub enum Reply {
    Rows(Vec<String>, Vec<Vec<RowValues>>),
    Dml(DmlOutcome),
    Fail(String),
}

/// Executor that records every statement and answers from a script.
/// Calls with no scripted reply succeed with an empty result.
#[derive(Default, Clone)]
pub struct RecordingExecutor {
    calls: Arc<Mutex<Vec<Call>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self, call: Call) -> Option<Reply> {
        self.calls.lock().unwrap().push(call);
        self.replies.lock().unwrap().pop_front()
    }
}

fn result_set(columns: Vec<String>, rows: Vec<Vec<RowValues>>) -> ResultSet {
    let mut rs = ResultSet::with_capacity(rows.len());
    rs.set_column_names(Arc::new(columns));
    for row in rows {
        rs.add_row_values(row);
    }
    rs
}

#[async_trait]
impl AsyncDatabaseExecutor for RecordingExecutor {
    async fn execute_batch(&self, query: &str) -> Result<(), DbaseError> {
        match self.next_reply(Call::Batch(query.to_string())) {
            Some(Reply::Fail(msg)) => Err(DbaseError::ExecutionError(msg)),
            _ => Ok(()),
        }
    }

    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, DbaseError> {
        match self.next_reply(Call::Select(query.to_string(), params.to_vec())) {
            Some(Reply::Rows(columns, rows)) => Ok(result_set(columns, rows)),
            Some(Reply::Fail(msg)) => Err(DbaseError::ExecutionError(msg)),
            _ => Ok(ResultSet::default()),
        }
    }

    async fn execute_dml(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<DmlOutcome, DbaseError> {
        match self.next_reply(Call::Dml(query.to_string(), params.to_vec())) {
            Some(Reply::Dml(outcome)) => Ok(outcome),
            Some(Reply::Fail(msg)) => Err(DbaseError::ExecutionError(msg)),
            _ => Ok(DmlOutcome::default()),
        }
    }
}

pub fn text(s: &str) -> RowValues {
    RowValues::Text(s.to_string())
}
