use crate::error::{ExportError, Result};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

/// Host platform, as far as default browser locations are concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => f.write_str("Darwin"),
            Platform::Linux => f.write_str("Linux"),
            Platform::Windows => f.write_str("Windows"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}

/// Which file inside a Chrome profile directory to locate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    History,
    Bookmarks,
}

impl StoreKind {
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKind::History => "History",
            StoreKind::Bookmarks => "Bookmarks",
        }
    }
}

/// Root of Chrome's per-user data for a platform, e.g. `~/.config/google-chrome`
///
/// Returns `None` when the platform has no known convention or the
/// environment variable it depends on is unset.
pub fn chrome_data_dir<E>(platform: &Platform, env: E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    match platform {
        Platform::MacOs => env("HOME")
            .map(|home| PathBuf::from(home).join("Library/Application Support/Google/Chrome")),
        Platform::Linux => env("HOME").map(|home| PathBuf::from(home).join(".config/google-chrome")),
        Platform::Windows => env("LOCALAPPDATA")
            .map(|base| PathBuf::from(base).join("Google").join("Chrome").join("User Data")),
        Platform::Other(_) => None,
    }
}

/// Default location of `kind` in the `Default` profile
pub fn default_store_path<E>(platform: &Platform, kind: StoreKind, env: E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    chrome_data_dir(platform, env).map(|dir| dir.join("Default").join(kind.file_name()))
}

/// Resolve the input file, preferring an explicit path over the platform default
pub fn resolve_input<E>(
    explicit: Option<&Path>,
    platform: &Platform,
    kind: StoreKind,
    env: E,
) -> Result<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_store_path(platform, kind, env).ok_or_else(|| {
            ExportError::InputNotFound {
                platform: platform.to_string(),
            }
        })?,
    };

    debug!("Resolved {} input to {}", kind.file_name(), path.display());

    if !path.exists() {
        return Err(ExportError::InputMissing(path));
    }

    Ok(path)
}
