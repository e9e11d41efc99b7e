use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;
use sqlx::types::Json;

use crate::types::RowValues;

pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Bind `params` to `query` positionally, in slice order.
#[must_use]
pub fn bind_params<'q>(query: MySqlQuery<'q>, params: &'q [RowValues]) -> MySqlQuery<'q> {
    params.iter().fold(query, bind_value)
}

fn bind_value<'q>(query: MySqlQuery<'q>, value: &'q RowValues) -> MySqlQuery<'q> {
    match value {
        RowValues::Int(i) => query.bind(*i),
        RowValues::Float(f) => query.bind(*f),
        RowValues::Text(s) => query.bind(s.as_str()),
        RowValues::Bool(b) => query.bind(*b),
        RowValues::Timestamp(dt) => query.bind(*dt),
        RowValues::Null => query.bind(None::<String>),
        RowValues::JSON(jsval) => query.bind(Json(jsval)),
        RowValues::Blob(bytes) => query.bind(bytes.as_slice()),
    }
}
