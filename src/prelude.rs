//! Convenient imports for common functionality.

pub use crate::error::DbaseError;
pub use crate::executor::AsyncDatabaseExecutor;
pub use crate::helpers::sanitize_whitespace;
pub use crate::mapper::{
    UpdateFieldSet, insert_row, insert_statement, update_row, update_statement,
};
pub use crate::mysql::{
    ConnectionString, MySqlSession, OpenOptions, Transport, connect, open, open_with,
};
pub use crate::ops::{
    create_database, create_table, current_user, database_exists, delete_row, exec,
    get_database_name, get_database_names, get_field_names, query, table_exists, use_database,
};
pub use crate::record::Record;
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::settings::{
    ConnectionSettings, ResolvedSettings, SettingName, SettingValue, SettingsStore, resolve,
};
pub use crate::types::{DmlOutcome, QueryAndParams, RowValues};
