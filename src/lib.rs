//! Async helpers over a MySQL server: resolve connection settings against
//! defaults, open and verify a handle, and turn record shapes into
//! parameterized INSERT/UPDATE statements.
//!
//! ```rust,no_run
//! use mysql_middleware::prelude::*;
//! use mysql_middleware::impl_record;
//!
//! struct Item {
//!     name: String,
//!     qty: i64,
//! }
//! impl_record!(Item { name, qty });
//!
//! # async fn demo() -> Result<(), DbaseError> {
//! let overrides = ConnectionSettings::new().with_user("app").with_user_pass("secret");
//! let store = connect(Some(overrides)).await?;
//! let Some(db) = store.handle() else {
//!     return Err(DbaseError::ConnectionError("not connected".into()));
//! };
//!
//! let id = insert_row(db, "items", Some(&Item { name: "bolt".into(), qty: 7 })).await?;
//! update_row(db, "items", id, Some(&UpdateFieldSet::new().with("qty", 3))).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod helpers;
pub mod mapper;
pub mod mysql;
pub mod ops;
pub mod prelude;
pub mod record;
pub mod results;
pub mod settings;
pub mod types;

pub use error::DbaseError;
pub use executor::AsyncDatabaseExecutor;
pub use helpers::sanitize_whitespace;
pub use mapper::{UpdateFieldSet, insert_row, insert_statement, update_row, update_statement};
pub use mysql::{
    ConnectionString, MySqlSession, OpenOptions, Transport, connect, open, open_with,
};
pub use record::Record;
pub use results::{CustomDbRow, ResultSet};
pub use settings::{
    ConnectionSettings, ResolvedSettings, SettingName, SettingValue, SettingsStore, resolve,
};
pub use types::{DmlOutcome, QueryAndParams, RowValues};
