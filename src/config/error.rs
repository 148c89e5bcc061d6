//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors raised while reading, validating or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` attached a file
    #[error("No config.yml attached yet, load the configuration first")]
    NotLoaded,

    /// No home directory to place `.config/todo-tui` under
    #[error("Could not locate a home directory for the todo-tui config")]
    HomeNotFound,

    #[error("Could not create config directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML in the file does not match the expected fields
    #[error("Could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not serialize configuration: {0}")]
    Serialize(String),

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Log level is not one of off, error, warn, info, debug, trace
    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),

    /// Gallery path exists but is a file
    #[error("Gallery path {0} is not a directory")]
    GalleryNotDirectory(PathBuf),

    /// Image cache path exists but is a file
    #[error("Image cache path {0} is not a directory")]
    CacheNotDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::NotLoaded;
        assert!(error.to_string().contains("load the configuration first"));

        let error = ConfigError::HomeNotFound;
        assert!(error.to_string().contains("home directory"));

        let error = ConfigError::Serialize("test".to_string());
        assert!(error.to_string().contains("test"));

        let error = ConfigError::InvalidLogLevel("loud".to_string());
        assert!(error.to_string().contains("loud"));
    }

    #[test]
    fn test_config_error_with_path() {
        let error = ConfigError::Parse {
            path: PathBuf::from("/test/config.yml"),
            message: "bad indent".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/test/config.yml"));
        assert!(error_str.contains("bad indent"));

        let error = ConfigError::GalleryNotDirectory(PathBuf::from("/srv/photo.png"));
        assert!(error.to_string().contains("/srv/photo.png"));

        let error = ConfigError::CacheNotDirectory(PathBuf::from("/tmp/cache"));
        assert!(error.to_string().contains("Image cache"));
    }
}
