use std::path::PathBuf;

/// Error type for every export stage
///
/// Each variant carries the path or context a user needs to act on it, so the
/// binaries can print the `Display` form directly to stderr.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No input given and no default location known for this platform
    #[error(
        "Your system (\"{platform}\") is not recognized. Please specify the input file manually."
    )]
    InputNotFound { platform: String },

    /// The resolved input path does not exist
    #[error(
        "The input file could not be found ({}). Please specify the input file manually.",
        .0.display()
    )]
    InputMissing(PathBuf),

    /// Copying the history store into the snapshot directory failed
    #[error("The file \"{}\" could not be copied: {source}", .path.display())]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The copied file is not a SQLite database
    #[error("The file \"{}\" could not be opened for reading: {source}", .path.display())]
    UnreadableStore {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The history query failed, usually an unsupported schema
    #[error("There was an error reading data from the file \"{}\": {source}", .path.display())]
    QueryFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// An input file (bookmarks, configuration) could not be read
    #[error("The file \"{}\" could not be read: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written
    #[error("The file \"{}\" could not be written: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The batch output directory could not be created
    #[error("The directory \"{}\" could not be created: {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot directory could not be removed
    #[error("The temporary directory \"{}\" could not be removed: {source}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed bookmarks file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single profile's export failed in batch mode
    #[error("Export of profile {profile} failed: {reason}")]
    ProfileExport { profile: String, reason: String },
}

/// Result type alias using ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_missing_names_path() {
        let err = ExportError::InputMissing(PathBuf::from("/nowhere/History"));
        assert!(err.to_string().contains("/nowhere/History"));
    }

    #[test]
    fn test_write_failed_names_path_and_cause() {
        let err = ExportError::WriteFailed {
            path: PathBuf::from("/read-only/out.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/read-only/out.html"));
        assert!(message.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_yaml_error_becomes_config_error() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("a: [").unwrap_err();
        let err: ExportError = yaml_err.into();
        assert!(matches!(err, ExportError::Config(_)));
    }
}
