//! Persisted user preferences
//!
//! A small JSON key/value file under the XDG config directory. Unknown or
//! missing files fall back to defaults; individual keys are addressable
//! from the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    None,
    Alphabetically,
    InstallDate,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaveatDisplay {
    #[default]
    Full,
    Mini,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sort_packages_by: SortOrder,
    pub display_advanced_dependencies: bool,
    pub caveat_display: CaveatDisplay,
    pub show_descriptions_in_search_results: bool,
}

/// Get the config directory (~/.config/spigot/ or equivalent)
pub fn config_dir() -> PathBuf {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config_home).join("spigot")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/spigot")
    } else {
        PathBuf::from(".config/spigot")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

impl Settings {
    /// Load from the default location; missing or unreadable files mean
    /// defaults rather than an error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Set one preference by its CLI key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sort-packages-by" => {
                self.sort_packages_by = match value {
                    "none" => SortOrder::None,
                    "alphabetically" => SortOrder::Alphabetically,
                    "install-date" => SortOrder::InstallDate,
                    "size" => SortOrder::Size,
                    other => {
                        return Err(anyhow!(
                            "invalid sort order '{other}' (expected none, alphabetically, install-date, or size)"
                        )
                        .into());
                    }
                };
            }
            "caveat-display" => {
                self.caveat_display = match value {
                    "full" => CaveatDisplay::Full,
                    "mini" => CaveatDisplay::Mini,
                    other => {
                        return Err(
                            anyhow!("invalid caveat display '{other}' (expected full or mini)")
                                .into(),
                        );
                    }
                };
            }
            "display-advanced-dependencies" => {
                self.display_advanced_dependencies = parse_bool(key, value)?;
            }
            "show-descriptions-in-search-results" => {
                self.show_descriptions_in_search_results = parse_bool(key, value)?;
            }
            other => return Err(anyhow!("unknown setting '{other}'").into()),
        }
        Ok(())
    }

    /// Key/value pairs for display, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let sort = match self.sort_packages_by {
            SortOrder::None => "none",
            SortOrder::Alphabetically => "alphabetically",
            SortOrder::InstallDate => "install-date",
            SortOrder::Size => "size",
        };
        let caveats = match self.caveat_display {
            CaveatDisplay::Full => "full",
            CaveatDisplay::Mini => "mini",
        };
        vec![
            ("sort-packages-by", sort.to_string()),
            ("caveat-display", caveats.to_string()),
            (
                "display-advanced-dependencies",
                self.display_advanced_dependencies.to_string(),
            ),
            (
                "show-descriptions-in-search-results",
                self.show_descriptions_in_search_results.to_string(),
            ),
        ]
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .with_context(|| format!("setting '{key}' expects true or false, got '{value}'"))
        .map_err(Into::into)
}
