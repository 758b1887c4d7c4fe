use std::path::PathBuf;

/// Directory holding `config.yml`
pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("chrome-export");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/chrome-export");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("chrome-export");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Environment lookup that the locator and batch defaults take as a parameter
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
