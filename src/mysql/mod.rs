// MySQL module - the one backend this crate drives, through sqlx.
//
// - config: transport selection, connection strings, driver options
// - connect: opening and verifying a handle from resolved settings
// - params: binding `RowValues` to sqlx queries
// - query: result extraction and building
// - executor: `AsyncDatabaseExecutor` for the handle
// - session: one pinned connection, for statements that share session state

pub mod config;
pub mod connect;
pub mod executor;
pub mod params;
pub mod query;
pub mod session;

pub use config::{ConnectionString, OpenOptions, Transport};
pub use connect::{connect, open, open_with};
pub use query::build_result_set;
pub use session::MySqlSession;
