//! # Settings
//!
//! User preferences, stored through the [`StorageBackend`] next to the record
//! collection (`vault-settings-v1.json` on disk).
//!
//! | Key | Default | Values |
//! |-----|---------|--------|
//! | `theme` | `light` | `light`, `dark` |
//! | `colorScheme` | `default` | `default`, `warm`, `cool` |
//! | `unit` | `pages` | `pages`, `hours`, `days`, `minutes` |
//! | `goal` | `1000` | pages to read, used by `bookvault stats` |
//!
//! A missing document yields the defaults. So does a corrupt one, after
//! logging the failure; the next save overwrites it.

use crate::error::Result;
use crate::store::backend::StorageBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_GOAL: u32 = 1000;

pub const KEYS: [&str; 4] = ["theme", "colorScheme", "unit", "goal"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Warm,
    Cool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingUnit {
    #[default]
    Pages,
    Hours,
    Days,
    Minutes,
}

macro_rules! named_values {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(format!(
                        "Invalid value '{}', expected one of: {}",
                        other,
                        Self::NAMES.join(", ")
                    )),
                }
            }
        }
    };
}

named_values!(Theme { Light => "light", Dark => "dark" });
named_values!(ColorScheme { Default => "default", Warm => "warm", Cool => "cool" });
named_values!(ReadingUnit {
    Pages => "pages",
    Hours => "hours",
    Days => "days",
    Minutes => "minutes",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub unit: ReadingUnit,
    #[serde(default = "default_goal")]
    pub goal: u32,
}

fn default_goal() -> u32 {
    DEFAULT_GOAL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color_scheme: ColorScheme::default(),
            unit: ReadingUnit::default(),
            goal: DEFAULT_GOAL,
        }
    }
}

/// Fields to merge into the current settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub color_scheme: Option<ColorScheme>,
    pub unit: Option<ReadingUnit>,
    pub goal: Option<u32>,
}

impl Settings {
    /// Load settings, falling back to defaults when missing or unreadable.
    pub fn load<B: StorageBackend>(backend: &B) -> Self {
        match backend.load_settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::error!("Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<B: StorageBackend>(&self, backend: &B) -> Result<()> {
        backend.save_settings(self)?;
        log::debug!("Saved settings");
        Ok(())
    }

    /// Merge `update` into the stored settings, persist, and return the result.
    pub fn update<B: StorageBackend>(backend: &B, update: SettingsUpdate) -> Result<Self> {
        let settings = Self::load(backend).merged(update);
        settings.save(backend)?;
        Ok(settings)
    }

    pub fn merged(mut self, update: SettingsUpdate) -> Self {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(color_scheme) = update.color_scheme {
            self.color_scheme = color_scheme;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        self
    }

    /// Value of a setting by key, as shown by `bookvault config KEY`.
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key)? {
            "theme" => Some(self.theme.to_string()),
            "colorScheme" => Some(self.color_scheme.to_string()),
            "unit" => Some(self.unit.to_string()),
            "goal" => Some(self.goal.to_string()),
            _ => None,
        }
    }

    /// Parse `value` for `key` into an update without touching `self`.
    pub fn parse_update(key: &str, value: &str) -> std::result::Result<SettingsUpdate, String> {
        let mut update = SettingsUpdate::default();
        match normalize_key(key) {
            Some("theme") => update.theme = Some(value.parse()?),
            Some("colorScheme") => update.color_scheme = Some(value.parse()?),
            Some("unit") => update.unit = Some(value.parse()?),
            Some("goal") => {
                update.goal = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| format!("Invalid goal '{}', expected a page count", value))?,
                )
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(update)
    }

    /// All settings as `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn normalize_key(key: &str) -> Option<&'static str> {
    match key.trim() {
        "theme" => Some("theme"),
        "colorScheme" | "color_scheme" | "color-scheme" => Some("colorScheme"),
        "unit" => Some("unit"),
        "goal" => Some("goal"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.color_scheme, ColorScheme::Default);
        assert_eq!(settings.unit, ReadingUnit::Pages);
        assert_eq!(settings.goal, 1000);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "theme": "light",
                "colorScheme": "default",
                "unit": "pages",
                "goal": 1000
            })
        );
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.goal, DEFAULT_GOAL);
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let backend = MemBackend::new();
        assert_eq!(Settings::load(&backend), Settings::default());
    }

    #[test]
    fn test_update_merges_and_persists() {
        let backend = MemBackend::new();
        Settings::update(
            &backend,
            SettingsUpdate {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .unwrap();
        let settings = Settings::update(
            &backend,
            SettingsUpdate {
                goal: Some(2500),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.goal, 2500);
        assert_eq!(Settings::load(&backend), settings);
    }

    #[test]
    fn test_update_reports_write_failure() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let result = Settings::update(
            &backend,
            SettingsUpdate {
                unit: Some(ReadingUnit::Hours),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_get_by_key() {
        let settings = Settings {
            color_scheme: ColorScheme::Warm,
            ..Default::default()
        };
        assert_eq!(settings.get("colorScheme").as_deref(), Some("warm"));
        assert_eq!(settings.get("color_scheme").as_deref(), Some("warm"));
        assert_eq!(settings.get("goal").as_deref(), Some("1000"));
        assert_eq!(settings.get("font"), None);
    }

    #[test]
    fn test_parse_update() {
        let update = Settings::parse_update("theme", "Dark").unwrap();
        assert_eq!(update.theme, Some(Theme::Dark));

        let update = Settings::parse_update("goal", " 1500 ").unwrap();
        assert_eq!(update.goal, Some(1500));

        assert!(Settings::parse_update("unit", "chapters")
            .unwrap_err()
            .contains("pages, hours, days, minutes"));
        assert!(Settings::parse_update("goal", "lots").is_err());
        assert_eq!(
            Settings::parse_update("font", "serif").unwrap_err(),
            "Unknown config key: font"
        );
    }

    #[test]
    fn test_entries_order() {
        let keys: Vec<&str> = Settings::default()
            .entries()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, KEYS.to_vec());
    }
}
