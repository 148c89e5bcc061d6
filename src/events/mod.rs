//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Device events: gallery permission, scanning and image editing
//! - Terminal events: User input and terminal interactions

pub mod device;
pub mod terminal;
