//! Application Configuration
//!
//! Manages editor settings:
//! - Undo history limits and viewport size
//! - Keyword highlighting profiles

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EditorError, Result};
use crate::style::KeywordTable;

/// Name of the profile shipped by default
pub const DEFAULT_PROFILE: &str = "python";

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum snapshots kept per history stack (unbounded if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Number of lines shown by the scroll view
    pub viewport_lines: usize,
    /// Prefix rendered lines with their line number
    pub show_line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            viewport_lines: 20,
            show_line_numbers: true,
        }
    }
}

/// Highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Active profile name
    pub profile: String,
    /// Keyword tables by profile name
    pub profiles: BTreeMap<String, KeywordTable>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), KeywordTable::python());
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            profiles,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Editor settings
    pub editor: EditorConfig,
    /// Highlighting settings
    pub highlight: HighlightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            editor: EditorConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linedit"))
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| EditorError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from a file, writing defaults if it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(path).await?;
            Ok(config)
        }
    }

    /// Save configuration to a file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Keyword table of the active profile
    pub fn keyword_table(&self) -> KeywordTable {
        match self.highlight.profiles.get(&self.highlight.profile) {
            Some(table) => table.clone(),
            None => {
                warn!(
                    "Unknown highlight profile {:?}, falling back to {}",
                    self.highlight.profile, DEFAULT_PROFILE
                );
                KeywordTable::python()
            }
        }
    }
}
