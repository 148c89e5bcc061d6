//! Device picker-specific error types.

use std::path::PathBuf;

/// Errors that can occur while scanning, editing or caching images.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Gallery directory could not be read
    #[error("Gallery directory {path} is unavailable: {source}")]
    GalleryUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Edited image could not be written to the cache
    #[error("Failed to write image cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Image could not be decoded or encoded
    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),

    /// Blocking image task did not complete
    #[error("Image task failed: {0}")]
    Task(String),
}
