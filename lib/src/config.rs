use crate::error::{ExportError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Browser configuration root scanned by the batch exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserRoot {
    pub name: String,
    pub path: PathBuf,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Render history entries that have no title, using the URL as link text
    #[serde(default)]
    pub include_untitled: bool,

    /// Where the batch exporter writes its files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Program the batch exporter runs for each profile
    #[serde(default)]
    pub exporter: Option<PathBuf>,

    /// Replaces the built-in browser list when set
    #[serde(default)]
    pub browsers: Option<Vec<BrowserRoot>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_untitled: false,
            output_dir: default_output_dir(),
            exporter: None,
            browsers: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ExportError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty or comment-only file deserializes to unit, not a mapping
        let blank = contents
            .lines()
            .map(str::trim)
            .all(|l| l.is_empty() || l.starts_with('#'));
        if blank {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location (~/.config/chrome-export/config.yml)
    /// Falls back to the default config if the file doesn't exist or is invalid
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}; using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
