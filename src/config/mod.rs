//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the gallery and cache locations, theme and log level.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/todo-tui";
const CACHE_DIRECTORY_PATH: &str = "todo-tui/images";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub gallery_path: PathBuf,
    pub cache_path: PathBuf,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub gallery_path: Option<PathBuf>,
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme_name() -> String {
    "rose-pine-dawn".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gallery_path() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("Pictures"))
}

fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_DIRECTORY_PATH)
}

impl Config {
    /// Return a new instance with default values.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            gallery_path: default_gallery_path(),
            cache_path: default_cache_path(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, write the defaults to
    /// it.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectory {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::Read {
                path: file_path.clone(),
                source: e,
            })?;
            let data: FileSpec =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: file_path.clone(),
                    message: e.to_string(),
                })?;
            self.theme_name = data.theme_name;
            if let Some(gallery_path) = data.gallery_path {
                self.gallery_path = gallery_path;
            }
            if let Some(cache_path) = data.cache_path {
                self.cache_path = cache_path;
            }
            self.log_level = data.log_level;
            self.log_level_filter()?;
        } else {
            self.save()?;
        }

        self.validate()?;
        Ok(())
    }

    /// Check that the gallery and image cache paths, when present, are
    /// directories. Missing directories are allowed: the gallery then reads
    /// as a denied permission and the cache is created on first write.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery_path.exists() && !self.gallery_path.is_dir() {
            return Err(ConfigError::GalleryNotDirectory(self.gallery_path.clone()));
        }
        if self.cache_path.exists() && !self.cache_path.is_dir() {
            return Err(ConfigError::CacheNotDirectory(self.cache_path.clone()));
        }
        Ok(())
    }

    /// Serialize the configuration data and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            gallery_path: Some(self.gallery_path.clone()),
            cache_path: Some(self.cache_path.clone()),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let write_failed = |e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(file_path).map_err(write_failed)?;
        write!(file, "{}", content).map_err(write_failed)?;
        file.flush().map_err(write_failed)?;
        Ok(())
    }

    /// Parse the configured log level.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeNotFound.into()),
        }
    }
}
