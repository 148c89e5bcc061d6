//! Device picker collaborators.
//!
//! This module stands in for the photo library and its permission prompt:
//! - `Gallery`: permission check, directory scan, crop and cache of picked images
//! - Picker types shared with state and rendering (`PickerOutcome`, `ImageRef`, ...)
//! - Device error handling

mod error;
mod gallery;
mod resource;

pub use error::DeviceError;
pub use gallery::Gallery;
pub use resource::*;
