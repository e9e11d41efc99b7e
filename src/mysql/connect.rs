use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use super::config::{OpenOptions, build_handle};
use crate::error::DbaseError;
use crate::ops::current_user;
use crate::settings::{ConnectionSettings, ResolvedSettings, SettingName, SettingsStore, resolve};

/// RFC 850 date as used by HTTP: `Monday, 25-Mar-24 10:11:12 GMT`.
const RFC850: &str = "%A, %d-%b-%y %H:%M:%S GMT";

/// Open a handle from a resolved store using default [`OpenOptions`].
///
/// # Errors
/// See [`open_with`].
pub async fn open(store: SettingsStore) -> Result<SettingsStore, DbaseError> {
    open_with(store, &OpenOptions::default()).await
}

/// Open a handle from a resolved store and verify it with `SELECT CURRENT_USER()`.
///
/// The handle is written into the `Connection` slot only when the probe
/// succeeds. A failed probe is logged and the store comes back `Ok` without a
/// handle, so check [`SettingsStore::is_connected`] rather than the result.
/// A store that already holds a handle is returned unchanged.
///
/// # Errors
/// Returns `DbaseError::ConfigError` if the store is not fully resolved and
/// `DbaseError::ConnectionError` if the handle cannot be constructed.
pub async fn open_with(
    store: SettingsStore,
    options: &OpenOptions,
) -> Result<SettingsStore, DbaseError> {
    if store.is_connected() {
        tracing::debug!(outcome = "already_connected", "store already holds a handle");
        return Ok(store);
    }
    let settings = ResolvedSettings::from_store(&store)?;

    let pool = build_handle(&settings, options).inspect_err(|err| {
        tracing::error!(
            outcome = "connect_failed",
            server_ip = %settings.server_ip,
            user = %settings.user,
            error = %err,
            "could not connect to database server"
        );
    })?;

    let verified = current_user(&pool).await;
    record_login(store, &settings, pool, verified).await
}

/// Write `pool` into the handle slot when `verified` holds the login identity,
/// otherwise close it and leave the slot empty.
async fn record_login(
    mut store: SettingsStore,
    settings: &ResolvedSettings,
    pool: MySqlPool,
    verified: Result<String, DbaseError>,
) -> Result<SettingsStore, DbaseError> {
    match verified {
        Ok(login) => {
            store.set(SettingName::Connection, pool)?;
            tracing::info!(
                outcome = "login",
                user = %login,
                at = %login_timestamp(Utc::now()),
                "login"
            );
            tracing::info!(
                outcome = "connected",
                server_name = %settings.server_name,
                server_ip = %settings.server_ip,
                "connected to database server"
            );
        }
        Err(err) => {
            tracing::error!(
                outcome = "verification_failed",
                server_ip = %settings.server_ip,
                user = %settings.user,
                error = %err,
                "could not verify database login"
            );
            pool.close().await;
        }
    }
    Ok(store)
}

fn login_timestamp(at: DateTime<Utc>) -> String {
    at.format(RFC850).to_string()
}

/// Resolve `overrides` and open a handle from them.
///
/// With no overrides the defaults are returned and no connection is
/// attempted. Overrides that already carry a handle keep it and skip opening.
///
/// # Errors
/// See [`open_with`].
pub async fn connect(overrides: Option<ConnectionSettings>) -> Result<SettingsStore, DbaseError> {
    let Some(overrides) = overrides else {
        return Ok(resolve(None));
    };
    open(resolve(Some(&overrides))).await
}
