//! Persistent settings: where the corpora and the catalog live.
//!
//! The file is `~/.config/cheat-merge/settings.toml`. Every value can be
//! overridden on the command line; a flag always wins over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::merge::DEFAULT_ATTRIBUTION;
use crate::util::write_bytes_atomically;

/// Folder of the GBA cheats inside a libretro-database checkout.
pub const DEFAULT_LIBRETRO_SYSTEM: &str = "cht/Nintendo - Game Boy Advance";

/// Keys accepted by [`set_path`], as `section.key`.
pub const PATH_KEYS: &[&str] = &["paths.vendor_dir", "paths.dat", "paths.libretro_database"];

/// Canonical path to the settings file: `~/.config/cheat-merge/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cheat-merge").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub merge: MergeSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// EZ-Flash `CHEATS` folder on the SD card
    pub vendor_dir: Option<PathBuf>,
    /// No-Intro GBA DAT file
    pub dat: Option<PathBuf>,
    /// libretro-database checkout
    pub libretro_database: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    pub libretro_system: String,
    pub attribution: String,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            libretro_system: DEFAULT_LIBRETRO_SYSTEM.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

impl Settings {
    /// Community cheat folder, when the database path is known.
    pub fn community_dir(&self, database_override: Option<&Path>, system: Option<&str>) -> Option<PathBuf> {
        let database = database_override.or(self.paths.libretro_database.as_deref())?;
        Some(database.join(system.unwrap_or(&self.merge.libretro_system)))
    }
}

/// Pick the command-line value if given, else the saved one.
pub fn resolve_path(flag: Option<PathBuf>, saved: Option<&Path>) -> Option<PathBuf> {
    flag.or_else(|| saved.map(Path::to_path_buf))
}

/// Load settings from the canonical location.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err.into()),
    }
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string(path: &Path) -> Result<Option<String>, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let doc: toml::Value = toml::from_str(&contents)?;
            Ok(Some(toml::to_string_pretty(&doc)?))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Save (or clear) one path setting such as `paths.dat`.
///
/// Works on the raw `toml::Value` so keys this version does not know about
/// survive the rewrite.
pub fn set_path(settings_file: &Path, key: &str, value: Option<&Path>) -> Result<(), SettingsError> {
    if !PATH_KEYS.contains(&key) {
        return Err(SettingsError::UnknownKey(key.to_string()));
    }
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

    let mut doc: toml::Value = match std::fs::read_to_string(settings_file) {
        Ok(contents) => toml::from_str(&contents)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(err) => return Err(err.into()),
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| std::io::Error::other("settings.toml root is not a table"))?;
    let section_table = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| std::io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(p) => {
            section_table.insert(
                field.to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            section_table.remove(field);
        }
    }

    let serialized = toml::to_string_pretty(&doc)?;
    write_bytes_atomically(settings_file, serialized.as_bytes())?;
    Ok(())
}
