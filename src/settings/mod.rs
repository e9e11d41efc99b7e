//! Connection settings: caller overrides, built-in defaults, and the
//! named-slot store that resolution produces.

mod resolve;
mod store;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::error::DbaseError;

pub use resolve::resolve;
pub use store::{SettingValue, SettingsStore};

/// Names of the slots held by a [`SettingsStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SettingName {
    Driver,
    User,
    UserPass,
    Database,
    ProjectId,
    InstanceId,
    ServerIp,
    ServerName,
    ServerPort,
    /// The open handle; the only non-text slot.
    Connection,
}

impl SettingName {
    pub const ALL: [SettingName; 10] = [
        SettingName::Driver,
        SettingName::User,
        SettingName::UserPass,
        SettingName::Database,
        SettingName::ProjectId,
        SettingName::InstanceId,
        SettingName::ServerIp,
        SettingName::ServerName,
        SettingName::ServerPort,
        SettingName::Connection,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SettingName::Driver => "Driver",
            SettingName::User => "User",
            SettingName::UserPass => "UserPass",
            SettingName::Database => "Database",
            SettingName::ProjectId => "ProjectID",
            SettingName::InstanceId => "InstanceID",
            SettingName::ServerIp => "ServerIP",
            SettingName::ServerName => "ServerName",
            SettingName::ServerPort => "ServerPort",
            SettingName::Connection => "Connection",
        }
    }

    #[must_use]
    pub fn is_handle(self) -> bool {
        matches!(self, SettingName::Connection)
    }

    /// Built-in default for this slot. Text slots always have one (possibly
    /// empty); the handle slot has none.
    #[must_use]
    pub fn default_value(self) -> Option<SettingValue> {
        let text = match self {
            SettingName::Driver => DEFAULT_DRIVER,
            SettingName::ServerIp => DEFAULT_SERVER_IP,
            SettingName::ServerName => DEFAULT_SERVER_NAME,
            SettingName::ServerPort => DEFAULT_SERVER_PORT,
            SettingName::Connection => return None,
            _ => "",
        };
        Some(SettingValue::Text(text.to_string()))
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = DbaseError;

    /// Accepts the display names (`ServerIP`) as well as the kebab-case
    /// command line spelling (`server-ip`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .or_else(|| <SettingName as ValueEnum>::from_str(s, true).ok())
            .ok_or_else(|| DbaseError::ConfigError(format!("unknown setting name: {s}")))
    }
}

pub const DEFAULT_DRIVER: &str = "mysql";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1";
pub const DEFAULT_SERVER_NAME: &str = "localhost";
pub const DEFAULT_SERVER_PORT: &str = "3306";

/// Caller-supplied connection settings. Every attribute is optional; an empty
/// string counts as absent and is filled from the defaults by [`resolve`].
///
/// ```rust
/// use mysql_middleware::prelude::*;
///
/// let overrides = ConnectionSettings::new()
///     .with_user("app")
///     .with_user_pass("secret")
///     .with_server_port("3307");
/// let store = resolve(Some(&overrides));
/// assert_eq!(store.text(SettingName::ServerName).as_deref(), Some("localhost"));
/// assert_eq!(store.text(SettingName::ServerPort).as_deref(), Some("3307"));
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub driver: Option<String>,
    pub user: Option<String>,
    #[serde(rename = "userPass")]
    pub user_pass: Option<String>,
    pub database: Option<String>,
    #[serde(rename = "projectID", alias = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "instanceID", alias = "instanceId")]
    pub instance_id: Option<String>,
    #[serde(rename = "serverIP", alias = "serverIp")]
    pub server_ip: Option<String>,
    #[serde(rename = "serverName")]
    pub server_name: Option<String>,
    #[serde(rename = "serverPort")]
    pub server_port: Option<String>,
    #[serde(skip)]
    pub connection: Option<MySqlPool>,
}

macro_rules! with_text {
    ($($method:ident => $field:ident),+ $(,)?) => {
        $(
            #[must_use]
            pub fn $method(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )+
    };
}

impl ConnectionSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    with_text! {
        with_driver => driver,
        with_user => user,
        with_user_pass => user_pass,
        with_database => database,
        with_project_id => project_id,
        with_instance_id => instance_id,
        with_server_ip => server_ip,
        with_server_name => server_name,
        with_server_port => server_port,
    }

    #[must_use]
    pub fn with_connection(mut self, pool: MySqlPool) -> Self {
        self.connection = Some(pool);
        self
    }

    /// The override held for `name`, or `None` when absent or empty.
    #[must_use]
    pub fn slot(&self, name: SettingName) -> Option<SettingValue> {
        let text = match name {
            SettingName::Driver => &self.driver,
            SettingName::User => &self.user,
            SettingName::UserPass => &self.user_pass,
            SettingName::Database => &self.database,
            SettingName::ProjectId => &self.project_id,
            SettingName::InstanceId => &self.instance_id,
            SettingName::ServerIp => &self.server_ip,
            SettingName::ServerName => &self.server_name,
            SettingName::ServerPort => &self.server_port,
            SettingName::Connection => {
                return self.connection.clone().map(SettingValue::Handle);
            }
        };
        text.as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| SettingValue::Text(value.to_string()))
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("driver", &self.driver)
            .field("user", &self.user)
            .field("user_pass", &self.user_pass.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("project_id", &self.project_id)
            .field("instance_id", &self.instance_id)
            .field("server_ip", &self.server_ip)
            .field("server_name", &self.server_name)
            .field("server_port", &self.server_port)
            .field("connection", &self.connection.is_some())
            .finish()
    }
}

/// The nine text slots of a resolved store, read out once for opening a
/// connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub driver: String,
    pub user: String,
    pub user_pass: String,
    pub database: String,
    pub project_id: String,
    pub instance_id: String,
    pub server_ip: String,
    pub server_name: String,
    pub server_port: String,
}

impl ResolvedSettings {
    /// # Errors
    /// Returns `DbaseError::ConfigError` if a text slot is missing or holds a handle.
    pub fn from_store(store: &SettingsStore) -> Result<Self, DbaseError> {
        let text = |name: SettingName| {
            store.text(name).ok_or_else(|| {
                DbaseError::ConfigError(format!("setting [ {name} ] has not been resolved"))
            })
        };
        Ok(ResolvedSettings {
            driver: text(SettingName::Driver)?,
            user: text(SettingName::User)?,
            user_pass: text(SettingName::UserPass)?,
            database: text(SettingName::Database)?,
            project_id: text(SettingName::ProjectId)?,
            instance_id: text(SettingName::InstanceId)?,
            server_ip: text(SettingName::ServerIp)?,
            server_name: text(SettingName::ServerName)?,
            server_port: text(SettingName::ServerPort)?,
        })
    }
}

impl fmt::Debug for ResolvedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSettings")
            .field("driver", &self.driver)
            .field("user", &self.user)
            .field("user_pass", &"<redacted>")
            .field("database", &self.database)
            .field("project_id", &self.project_id)
            .field("instance_id", &self.instance_id)
            .field("server_ip", &self.server_ip)
            .field("server_name", &self.server_name)
            .field("server_port", &self.server_port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_both_spellings() {
        assert_eq!("ServerIP".parse::<SettingName>().unwrap(), SettingName::ServerIp);
        assert_eq!("serverip".parse::<SettingName>().unwrap(), SettingName::ServerIp);
        assert_eq!("server-port".parse::<SettingName>().unwrap(), SettingName::ServerPort);
        assert!("Password".parse::<SettingName>().is_err());
    }

    #[test]
    fn empty_override_counts_as_absent() {
        let settings = ConnectionSettings::new().with_user("").with_database("shop");
        assert!(settings.slot(SettingName::User).is_none());
        assert!(matches!(
            settings.slot(SettingName::Database),
            Some(SettingValue::Text(ref db)) if db == "shop"
        ));
    }

    #[test]
    fn deserializes_mixed_case_keys() {
        let settings: ConnectionSettings = serde_json::from_value(serde_json::json!({
            "user": "app",
            "projectID": "proj",
            "instanceID": "inst",
            "serverIP": "10.0.0.5"
        }))
        .unwrap();
        assert_eq!(settings.user.as_deref(), Some("app"));
        assert_eq!(settings.project_id.as_deref(), Some("proj"));
        assert_eq!(settings.instance_id.as_deref(), Some("inst"));
        assert_eq!(settings.server_ip.as_deref(), Some("10.0.0.5"));
        assert!(settings.server_port.is_none());
    }

    #[test]
    fn resolved_debug_hides_password() {
        let store = resolve(Some(&ConnectionSettings::new().with_user_pass("hunter2")));
        let resolved = ResolvedSettings::from_store(&store).unwrap();
        let rendered = format!("{resolved:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(resolved.user_pass, "hunter2");
    }

    #[test]
    fn empty_store_does_not_project() {
        let err = ResolvedSettings::from_store(&SettingsStore::new()).unwrap_err();
        assert!(matches!(err, DbaseError::ConfigError(_)));
    }
}
