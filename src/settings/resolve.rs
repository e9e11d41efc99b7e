use super::{ConnectionSettings, SettingName, SettingsStore};

/// Merge `overrides` over the built-in defaults, slot by slot.
///
/// Each slot takes the override when present and the default otherwise; an
/// override that sets some fields still gets defaults for the rest. With no
/// overrides the store holds exactly the defaults. Never connects.
#[must_use]
pub fn resolve(overrides: Option<&ConnectionSettings>) -> SettingsStore {
    SettingName::ALL
        .into_iter()
        .fold(SettingsStore::new(), |mut store, name| {
            let value = overrides
                .and_then(|settings| settings.slot(name))
                .or_else(|| name.default_value());
            if let Some(value) = value {
                store.insert(name, value);
            }
            store
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{
        DEFAULT_DRIVER, DEFAULT_SERVER_IP, DEFAULT_SERVER_NAME, DEFAULT_SERVER_PORT,
    };

    fn text(store: &SettingsStore, name: SettingName) -> String {
        store.text(name).unwrap_or_else(|| panic!("{name} missing"))
    }

    #[test]
    fn no_overrides_yields_defaults() {
        let store = resolve(None);
        assert_eq!(text(&store, SettingName::Driver), DEFAULT_DRIVER);
        assert_eq!(text(&store, SettingName::ServerIp), DEFAULT_SERVER_IP);
        assert_eq!(text(&store, SettingName::ServerName), DEFAULT_SERVER_NAME);
        assert_eq!(text(&store, SettingName::ServerPort), DEFAULT_SERVER_PORT);
        for name in [
            SettingName::User,
            SettingName::UserPass,
            SettingName::Database,
            SettingName::ProjectId,
            SettingName::InstanceId,
        ] {
            assert_eq!(text(&store, name), "");
        }
        assert!(!store.contains(SettingName::Connection));
    }

    #[test]
    fn overrides_win_field_by_field() {
        let overrides = ConnectionSettings::new()
            .with_user("app")
            .with_server_name("db.internal")
            .with_server_port("");
        let store = resolve(Some(&overrides));
        assert_eq!(text(&store, SettingName::User), "app");
        assert_eq!(text(&store, SettingName::ServerName), "db.internal");
        assert_eq!(text(&store, SettingName::ServerPort), DEFAULT_SERVER_PORT);
        assert_eq!(text(&store, SettingName::ServerIp), DEFAULT_SERVER_IP);
        assert!(!store.is_connected());
    }

    #[test]
    fn every_text_slot_is_populated() {
        let partials = [
            ConnectionSettings::new(),
            ConnectionSettings::new().with_driver("mysql").with_database("shop"),
            ConnectionSettings::new()
                .with_driver("mysql")
                .with_user("u")
                .with_user_pass("p")
                .with_database("d")
                .with_project_id("proj")
                .with_instance_id("inst")
                .with_server_ip("10.1.1.1")
                .with_server_name("db")
                .with_server_port("3310"),
        ];
        for partial in &partials {
            let store = resolve(Some(partial));
            for name in SettingName::ALL.into_iter().filter(|n| !n.is_handle()) {
                assert!(store.text(name).is_some(), "{name} not populated");
            }
            for name in [
                SettingName::Driver,
                SettingName::ServerIp,
                SettingName::ServerName,
                SettingName::ServerPort,
            ] {
                assert!(!text(&store, name).is_empty(), "{name} left empty");
            }
        }
    }
}
