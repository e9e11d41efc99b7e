use std::collections::HashMap;
use std::fmt;

use sqlx::MySqlPool;

use super::SettingName;
use crate::error::DbaseError;

/// A value held in one slot of a [`SettingsStore`].
#[derive(Debug, Clone)]
pub enum SettingValue {
    Text(String),
    Handle(MySqlPool),
}

impl SettingValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SettingValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_handle(&self) -> Option<&MySqlPool> {
        if let SettingValue::Handle(pool) = self {
            Some(pool)
        } else {
            None
        }
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<MySqlPool> for SettingValue {
    fn from(pool: MySqlPool) -> Self {
        SettingValue::Handle(pool)
    }
}

/// Named-slot holder for resolved settings and the open handle.
///
/// Text values are handed out by copy, the handle by shared reference.
#[derive(Clone, Default)]
pub struct SettingsStore {
    entries: HashMap<SettingName, SettingValue>,
}

impl SettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, returning the previous value.
    ///
    /// # Errors
    /// Returns `DbaseError::ConfigError` when a handle is stored in a text
    /// slot or text in the handle slot.
    pub fn set(
        &mut self,
        name: SettingName,
        value: impl Into<SettingValue>,
    ) -> Result<Option<SettingValue>, DbaseError> {
        let value = value.into();
        if name.is_handle() != matches!(value, SettingValue::Handle(_)) {
            return Err(DbaseError::ConfigError(format!(
                "setting [ {name} ] cannot hold this kind of value"
            )));
        }
        Ok(self.entries.insert(name, value))
    }

    /// Store a value whose kind already matches the slot.
    pub(crate) fn insert(&mut self, name: SettingName, value: SettingValue) {
        self.entries.insert(name, value);
    }

    #[must_use]
    pub fn get(&self, name: SettingName) -> Option<&SettingValue> {
        self.entries.get(&name)
    }

    #[must_use]
    pub fn contains(&self, name: SettingName) -> bool {
        self.entries.contains_key(&name)
    }

    /// Copy of the text held under `name`.
    #[must_use]
    pub fn text(&self, name: SettingName) -> Option<String> {
        self.get(name)
            .and_then(SettingValue::as_text)
            .map(str::to_string)
    }

    /// The verified handle, absent until a connection has been opened.
    #[must_use]
    pub fn handle(&self) -> Option<&MySqlPool> {
        self.get(SettingName::Connection)
            .and_then(SettingValue::as_handle)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.handle().is_some()
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in SettingName::ALL {
            match (name, self.entries.get(&name)) {
                (_, None) => {}
                (SettingName::UserPass, Some(_)) => {
                    map.entry(&name.as_str(), &"<redacted>");
                }
                (_, Some(value)) => {
                    map.entry(&name.as_str(), value);
                }
            }
        }
        map.finish()
    }
}
