use crate::types::Complexity;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_THEME: &str = "space";
pub const DEFAULT_SETTINGS_FILE: &str = "story-password.json";

/// Which kind of password the `generate` action produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordType {
    #[default]
    Story,
    Standard,
}

impl fmt::Display for PasswordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordType::Story => f.write_str("story"),
            PasswordType::Standard => f.write_str("standard"),
        }
    }
}

impl FromStr for PasswordType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "story" => Ok(PasswordType::Story),
            "standard" => Ok(PasswordType::Standard),
            other => Err(anyhow::anyhow!(
                "Invalid password type: {}. Use 'story' or 'standard'",
                other
            )),
        }
    }
}

/// Persisted user choices, stored as a flat JSON key-value document.
///
/// Keys the generator does not know about are kept and written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient")]
    pub password_type: PasswordType,
    #[serde(default = "default_theme")]
    pub story_theme: String,
    #[serde(default, deserialize_with = "lenient")]
    pub story_complexity: Complexity,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            password_type: PasswordType::default(),
            story_theme: default_theme(),
            story_complexity: Complexity::default(),
            extra: serde_json::Map::new(),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

/// Parse a string setting, keeping the default when the value is not recognised
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = anyhow::Error> + Default,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|e| {
        warn!("{}, using default", e);
        T::default()
    }))
}

/// JSON file backed settings store
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved settings, or defaults when nothing has been saved yet
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings {:?}", self.path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", self.path))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings {:?}", self.path))?;
        info!("Settings saved to {:?}", self.path);
        Ok(())
    }
}
