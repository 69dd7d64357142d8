//! Generator configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for playlist generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of the osu! website / API
    pub api_base_url: String,
    /// Beatmapset archive download URL; `{set_id}` is substituted
    pub beatmapset_url: String,
    /// Properties file holding `client_id` and `client_secret`
    pub credentials_path: Option<PathBuf>,
    /// Fixed pause between playlist entries
    pub request_delay_ms: u64,
    /// Timeout for every HTTP request
    pub http_timeout_secs: u64,
    pub cover: CoverStyle,
    pub fonts: FontSet,
}

/// Tunables of the composed cover
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverStyle {
    /// Brightness multiplier applied to the background
    pub brightness: f32,
    /// Maximum title width in pixels at size 72
    pub title_budget: f32,
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self {
            brightness: 0.25,
            title_budget: 1416.0,
        }
    }
}

/// Font files per text role. Roles without an override use `default`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSet {
    pub default: Option<PathBuf>,
    pub title: Option<PathBuf>,
    pub artist: Option<PathBuf>,
    /// Difficulty name
    pub version: Option<PathBuf>,
    /// The literal "mapped by"
    pub mapped_by: Option<PathBuf>,
    /// Mapper name
    pub creator: Option<PathBuf>,
    /// Difficulty table
    pub mono: Option<PathBuf>,
}

/// Text roles on a cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Artist,
    Version,
    MappedBy,
    Creator,
    Mono,
}

impl FontSet {
    /// Font file for `role`, falling back to the default font
    pub fn path_for(&self, role: FontRole) -> Result<&Path> {
        let specific = match role {
            FontRole::Title => &self.title,
            FontRole::Artist => &self.artist,
            FontRole::Version => &self.version,
            FontRole::MappedBy => &self.mapped_by,
            FontRole::Creator => &self.creator,
            FontRole::Mono => &self.mono,
        };

        specific
            .as_deref()
            .or(self.default.as_deref())
            .ok_or_else(|| Error::Config(format!("No font configured for {:?} text", role)))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://osu.ppy.sh".to_string(),
            beatmapset_url: "https://catboy.best/d/{set_id}".to_string(),
            credentials_path: None,
            request_delay_ms: 1000,
            http_timeout_secs: 30,
            cover: CoverStyle::default(),
            fonts: FontSet::default(),
        }
    }
}

impl GeneratorConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("osu-playlist").join("config.json"))
    }

    /// Load config from disk, falling back to defaults if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file; a broken file is an error here
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("Config directory not found".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Archive URL for a beatmapset
    pub fn beatmapset_url(&self, set_id: u32) -> String {
        self.beatmapset_url.replace("{set_id}", &set_id.to_string())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
