//! Settings Module
//! Persistent user preferences behind a narrow key/value interface.
//!
//! Only the page theme is stored. The GUI receives a `ThemePreference`
//! built on an injected `SettingsStore`, so tests can swap the file-backed
//! store for an in-memory one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme";

const APP_DIR: &str = "chartify-lab";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// Minimal persistent key/value store.
pub trait SettingsStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Non-persistent store, used in tests and when no config dir exists.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, String>,
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

/// JSON-file store; every `set` rewrites the file.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    file: SettingsFile,
}

impl FileSettingsStore {
    /// Default location: `<config dir>/chartify-lab/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// or malformed file is logged and treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                SettingsFile::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsFile::default(),
            Err(e) => {
                tracing::warn!("Cannot read settings file {}: {}", path.display(), e);
                SettingsFile::default()
            }
        };
        Self { path, file }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.file.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.file.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Page theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::System => "System",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Theme read once at startup and written back on every change.
pub struct ThemePreference {
    store: Box<dyn SettingsStore>,
    theme: Theme,
}

impl ThemePreference {
    /// Read the stored theme, defaulting to `System`.
    pub fn load(store: Box<dyn SettingsStore>) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|value| match value.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("{}; using system theme", e);
                    None
                }
            })
            .unwrap_or_default();
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply and persist a theme. The in-memory choice changes even when
    /// writing it out fails.
    pub fn set(&mut self, theme: Theme) -> Result<(), SettingsError> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Explicit override for the page; `None` defers to the OS preference.
    pub fn marker(&self) -> Option<Theme> {
        match self.theme {
            Theme::System => None,
            explicit => Some(explicit),
        }
    }

    /// egui equivalent of the marker.
    pub fn egui_preference(&self) -> egui::ThemePreference {
        match self.marker() {
            None => egui::ThemePreference::System,
            Some(Theme::Light) => egui::ThemePreference::Light,
            Some(_) => egui::ThemePreference::Dark,
        }
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_strings_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
        }
        assert_eq!(
            "purple".parse::<Theme>(),
            Err(UnknownTheme("purple".to_string()))
        );
    }

    #[test]
    fn defaults_to_system_when_unset() {
        let pref = ThemePreference::load(Box::new(MemorySettingsStore::default()));
        assert_eq!(pref.theme(), Theme::System);
        assert_eq!(pref.marker(), None);
    }

    #[test]
    fn unknown_stored_value_falls_back() {
        let mut store = MemorySettingsStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemePreference::load(Box::new(store)).theme(), Theme::System);
    }

    #[test]
    fn dark_sets_marker_and_persists() {
        let mut pref = ThemePreference::load(Box::new(MemorySettingsStore::default()));
        pref.set(Theme::Dark).unwrap();
        assert_eq!(pref.marker(), Some(Theme::Dark));
        assert_eq!(pref.store().get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(pref.egui_preference(), egui::ThemePreference::Dark);
    }

    #[test]
    fn system_clears_marker_and_persists() {
        let mut pref = ThemePreference::load(Box::new(MemorySettingsStore::default()));
        pref.set(Theme::Light).unwrap();
        pref.set(Theme::System).unwrap();
        assert_eq!(pref.marker(), None);
        assert_eq!(pref.store().get(THEME_KEY).as_deref(), Some("system"));
        assert_eq!(pref.egui_preference(), egui::ThemePreference::System);
    }
}
