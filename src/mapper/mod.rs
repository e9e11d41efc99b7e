//! Statement composition from record shapes and field sets.
//!
//! The `*_statement` functions are pure and return the SQL text with its bound
//! values; the `*_row` functions run them against an executor and log the
//! outcome.

mod insert;
mod update;

pub use insert::{insert_row, insert_statement};
pub use update::{UpdateFieldSet, update_row, update_statement};

use crate::error::DbaseError;
use crate::helpers::check_identifier;

/// Lower-case a column name and make sure it can be spliced into SQL.
fn column_name(name: &str) -> Result<String, DbaseError> {
    let lowered = name.to_lowercase();
    check_identifier("column", &lowered)?;
    Ok(lowered)
}
