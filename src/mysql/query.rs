use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::types::Json;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::error::DbaseError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Build a result set from fetched MySQL rows.
///
/// # Errors
/// Returns errors from row value extraction.
pub fn build_result_set(rows: &[MySqlRow]) -> Result<ResultSet, DbaseError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    if let Some(row) = rows.first() {
        let cols: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
        result_set.set_column_names(Arc::new(cols));
    }

    for row in rows {
        let col_count = row.columns().len();
        let mut row_values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            row_values.push(mysql_extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Extracts a `RowValues` from a MySQL row at the given index.
///
/// # Errors
/// Returns `DbaseError` if the column cannot be decoded.
pub fn mysql_extract_value(row: &MySqlRow, idx: usize) -> Result<RowValues, DbaseError> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(RowValues::Null);
    }
    let type_name = raw.type_info().name().to_string();

    if type_name == "BOOLEAN" {
        let val: bool = row.try_get(idx)?;
        Ok(RowValues::Bool(val))
    } else if type_name.ends_with("UNSIGNED") {
        let val: u64 = row.try_get(idx)?;
        Ok(i64::try_from(val).map_or_else(|_| RowValues::Text(val.to_string()), RowValues::Int))
    } else if matches!(
        type_name.as_str(),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT"
    ) {
        let val: i64 = row.try_get(idx)?;
        Ok(RowValues::Int(val))
    } else if type_name == "YEAR" {
        let val: i64 = row.try_get_unchecked(idx)?;
        Ok(RowValues::Int(val))
    } else if type_name == "FLOAT" || type_name == "DOUBLE" {
        let val: f64 = row.try_get(idx)?;
        Ok(RowValues::Float(val))
    } else if type_name == "DECIMAL" {
        // sent as text on the wire; no decimal type is pulled in for it
        let val: String = row.try_get_unchecked(idx)?;
        Ok(val
            .parse::<f64>()
            .map_or(RowValues::Text(val), RowValues::Float))
    } else if type_name == "DATETIME" || type_name == "TIMESTAMP" {
        let val: NaiveDateTime = row.try_get(idx)?;
        Ok(RowValues::Timestamp(val))
    } else if type_name == "DATE" {
        let val: NaiveDate = row.try_get(idx)?;
        Ok(RowValues::Timestamp(val.and_time(NaiveTime::MIN)))
    } else if type_name == "TIME" {
        let val: NaiveTime = row.try_get(idx)?;
        Ok(RowValues::Text(val.to_string()))
    } else if type_name == "JSON" {
        let val: Json<Value> = row.try_get(idx)?;
        Ok(RowValues::JSON(val.0))
    } else if type_name.ends_with("BLOB") || type_name.ends_with("BINARY") {
        let val: Vec<u8> = row.try_get(idx)?;
        Ok(RowValues::Blob(val))
    } else {
        // VARCHAR, CHAR, TEXT, ENUM, SET and anything unrecognized. Some
        // INFORMATION_SCHEMA columns carry binary collations, so fall back to
        // the raw bytes.
        match row.try_get::<String, _>(idx) {
            Ok(val) => Ok(RowValues::Text(val)),
            Err(_) => {
                let bytes: Vec<u8> = row.try_get_unchecked(idx)?;
                Ok(RowValues::Text(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }
}
