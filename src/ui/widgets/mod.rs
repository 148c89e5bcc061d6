//! Reusable UI widget components.
//!
//! This module contains reusable widget components such as spinners, styling
//! utilities and image thumbnails.

pub mod spinner;
pub mod styling;
pub mod thumbnail;
