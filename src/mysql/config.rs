use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;

use crate::error::DbaseError;
use crate::settings::{DEFAULT_DRIVER, DEFAULT_SERVER_IP, DEFAULT_SERVER_NAME, ResolvedSettings};

/// How the handle reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Transport {
    /// Plain TCP to `serverName:serverPort`.
    Tcp,
    /// The hosted Cloud SQL unix socket for `projectID:instanceID`.
    CloudSql,
}

impl Transport {
    /// TCP when either signal points at the local machine, hosted otherwise.
    /// The two signals are not checked against each other.
    #[must_use]
    pub fn select(settings: &ResolvedSettings) -> Self {
        if settings.server_name == DEFAULT_SERVER_NAME || settings.server_ip == DEFAULT_SERVER_IP {
            Transport::Tcp
        } else {
            Transport::CloudSql
        }
    }
}

/// Driver connection string in one of its two forms:
/// `user:pass@tcp(serverName:serverPort)/` or
/// `user@cloudsql(projectID:instanceID)/database`.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionString {
    Tcp {
        user: String,
        password: String,
        server_name: String,
        server_port: String,
    },
    CloudSql {
        user: String,
        project_id: String,
        instance_id: String,
        database: String,
    },
}

impl ConnectionString {
    #[must_use]
    pub fn from_settings(settings: &ResolvedSettings) -> Self {
        match Transport::select(settings) {
            Transport::Tcp => ConnectionString::Tcp {
                user: settings.user.clone(),
                password: settings.user_pass.clone(),
                server_name: settings.server_name.clone(),
                server_port: settings.server_port.clone(),
            },
            Transport::CloudSql => ConnectionString::CloudSql {
                user: settings.user.clone(),
                project_id: settings.project_id.clone(),
                instance_id: settings.instance_id.clone(),
                database: settings.database.clone(),
            },
        }
    }

    #[must_use]
    pub fn transport(&self) -> Transport {
        match self {
            ConnectionString::Tcp { .. } => Transport::Tcp,
            ConnectionString::CloudSql { .. } => Transport::CloudSql,
        }
    }

    /// The string with the password masked, safe for logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            ConnectionString::Tcp {
                user,
                server_name,
                server_port,
                ..
            } => format!("{user}:***@tcp({server_name}:{server_port})/"),
            ConnectionString::CloudSql { .. } => self.to_string(),
        }
    }

    /// Map the string onto sqlx connect options.
    ///
    /// # Errors
    /// Returns `DbaseError::ConnectionError` if the port is not a valid number.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, DbaseError> {
        match self {
            ConnectionString::Tcp {
                user,
                password,
                server_name,
                server_port,
            } => {
                let port: u16 = server_port.parse().map_err(|e| {
                    DbaseError::ConnectionError(format!("invalid server port {server_port:?}: {e}"))
                })?;
                let mut options = MySqlConnectOptions::new()
                    .host(server_name)
                    .port(port)
                    .username(user);
                if !password.is_empty() {
                    options = options.password(password);
                }
                Ok(options)
            }
            ConnectionString::CloudSql {
                user,
                project_id,
                instance_id,
                database,
            } => {
                let mut options = MySqlConnectOptions::new()
                    .socket(format!("/cloudsql/{project_id}:{instance_id}"))
                    .username(user);
                if !database.is_empty() {
                    options = options.database(database);
                }
                Ok(options)
            }
        }
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionString::Tcp {
                user,
                password,
                server_name,
                server_port,
            } => write!(f, "{user}:{password}@tcp({server_name}:{server_port})/"),
            ConnectionString::CloudSql {
                user,
                project_id,
                instance_id,
                database,
            } => write!(f, "{user}@cloudsql({project_id}:{instance_id})/{database}"),
        }
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionString")
            .field(&self.redacted())
            .finish()
    }
}

/// Driver-level knobs applied when the handle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// How long acquiring a connection may take before the driver gives up.
    pub acquire_timeout: Duration,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl OpenOptions {
    #[must_use]
    pub fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }
}

/// Build a lazily connecting handle. No socket is opened here.
///
/// # Errors
/// Returns `DbaseError::ConnectionError` for an unsupported driver or
/// unusable connection options.
pub fn build_handle(
    settings: &ResolvedSettings,
    options: &OpenOptions,
) -> Result<MySqlPool, DbaseError> {
    if settings.driver != DEFAULT_DRIVER {
        return Err(DbaseError::ConnectionError(format!(
            "unsupported driver {:?}",
            settings.driver
        )));
    }
    let connect_options = ConnectionString::from_settings(settings).connect_options()?;
    Ok(MySqlPoolOptions::new()
        .acquire_timeout(options.acquire_timeout)
        .connect_lazy_with(connect_options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ConnectionSettings, resolve};

    fn resolved(overrides: ConnectionSettings) -> ResolvedSettings {
        ResolvedSettings::from_store(&resolve(Some(&overrides))).unwrap()
    }

    #[test]
    fn localhost_uses_tcp() {
        let settings = resolved(
            ConnectionSettings::new()
                .with_user("app")
                .with_user_pass("pw")
                .with_server_ip("10.0.0.9"),
        );
        let cs = ConnectionString::from_settings(&settings);
        assert_eq!(cs.transport(), Transport::Tcp);
        assert_eq!(cs.to_string(), "app:pw@tcp(localhost:3306)/");
    }

    #[test]
    fn loopback_ip_uses_tcp_even_for_remote_name() {
        let settings = resolved(
            ConnectionSettings::new()
                .with_user("app")
                .with_server_name("db.example.com"),
        );
        assert_eq!(Transport::select(&settings), Transport::Tcp);
        assert_eq!(
            ConnectionString::from_settings(&settings).to_string(),
            "app:@tcp(db.example.com:3306)/"
        );
    }

    #[test]
    fn remote_signals_use_cloudsql() {
        let settings = resolved(
            ConnectionSettings::new()
                .with_user("app")
                .with_user_pass("never-shown")
                .with_database("shop")
                .with_project_id("proj")
                .with_instance_id("inst")
                .with_server_ip("10.0.0.9")
                .with_server_name("db.example.com"),
        );
        let cs = ConnectionString::from_settings(&settings);
        assert_eq!(cs.transport(), Transport::CloudSql);
        assert_eq!(cs.to_string(), "app@cloudsql(proj:inst)/shop");
    }

    #[test]
    fn port_change_only_moves_port_segment() {
        let base = ConnectionSettings::new().with_user("app").with_user_pass("pw");
        let a = ConnectionString::from_settings(&resolved(base.clone().with_server_port("3306")));
        let b = ConnectionString::from_settings(&resolved(base.with_server_port("4406")));
        let (a, b) = (a.to_string(), b.to_string());
        assert_eq!(a.replace(":3306)", ":4406)"), b);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn redacted_hides_password() {
        let settings = resolved(ConnectionSettings::new().with_user("app").with_user_pass("pw"));
        let cs = ConnectionString::from_settings(&settings);
        assert_eq!(cs.redacted(), "app:***@tcp(localhost:3306)/");
        assert!(!format!("{cs:?}").contains("pw@"));
    }

    #[test]
    fn bad_port_is_connection_error() {
        let settings = resolved(ConnectionSettings::new().with_server_port("eighty"));
        let err = ConnectionString::from_settings(&settings)
            .connect_options()
            .unwrap_err();
        assert!(matches!(err, DbaseError::ConnectionError(_)));
    }
}
