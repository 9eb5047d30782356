//! User Settings
//!
//! Settings are stored as JSON tagged with a `version` field. Older records
//! are brought up to date through a chain of pure migration steps; records
//! from a newer build are rejected rather than guessed at.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version written by `save_settings`.
pub const SETTINGS_VERSION: u64 = 1;

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u64),
    #[error("Settings record has no version")]
    MissingVersion,
    #[error("Malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Active settings snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Pattern document, one directive per line.
    pub filter_patterns: String,
    pub hide_suggested: bool,
    pub hide_content_credentials: bool,
    /// Highlight matches instead of hiding them. Display only.
    pub highlight_mode: bool,
}

/// Unversioned record written before settings carried a version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsV0 {
    pub regex_list: Vec<String>,
    pub debug_mode: bool,
}

/// Stored settings, as found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSettings {
    V0(SettingsV0),
    V1(Settings),
}

#[derive(Serialize)]
struct VersionedRecord<'a> {
    version: u64,
    #[serde(flatten)]
    settings: &'a Settings,
}

impl StoredSettings {
    /// Parse a stored record without migrating it.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_json::from_str(raw)?;

        let version = match value.get("version") {
            Some(version) => version.as_u64().ok_or(SettingsError::MissingVersion)?,
            None if value.get("regexList").is_some() => 0,
            None => return Err(SettingsError::MissingVersion),
        };

        match version {
            0 => Ok(StoredSettings::V0(serde_json::from_value(value)?)),
            1 => Ok(StoredSettings::V1(serde_json::from_value(value)?)),
            other => Err(SettingsError::UnsupportedVersion(other)),
        }
    }

    pub fn version(&self) -> u64 {
        match self {
            StoredSettings::V0(_) => 0,
            StoredSettings::V1(_) => 1,
        }
    }

    /// Apply a single migration step.
    fn upgrade(self) -> Self {
        match self {
            StoredSettings::V0(v0) => StoredSettings::V1(migrate_v0_to_v1(v0)),
            current @ StoredSettings::V1(_) => current,
        }
    }
}

fn migrate_v0_to_v1(v0: SettingsV0) -> Settings {
    Settings {
        filter_patterns: v0.regex_list.join("\n"),
        hide_suggested: false,
        hide_content_credentials: false,
        highlight_mode: v0.debug_mode,
    }
}

/// Run migrations until the record reaches the current version.
pub fn migrate(mut stored: StoredSettings) -> Settings {
    loop {
        match stored {
            StoredSettings::V1(settings) => return settings,
            older => {
                log::debug!("Migrating settings from version {}", older.version());
                stored = older.upgrade();
            }
        }
    }
}

/// Load settings from their stored form. `None` yields the defaults.
pub fn load_settings(raw: Option<&str>) -> Result<Settings, SettingsError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(migrate(StoredSettings::from_json(raw)?)),
        _ => Ok(Settings::default()),
    }
}

/// Serialize settings at the current version.
pub fn save_settings(settings: &Settings) -> Result<String, SettingsError> {
    let record = VersionedRecord {
        version: SETTINGS_VERSION,
        settings,
    };
    Ok(serde_json::to_string(&record)?)
}
