//! Shared helpers for dates and media files.

pub mod date;
pub mod media;
