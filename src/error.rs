//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::config::ConfigError;
pub use crate::device::DeviceError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Gallery and image picker errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
