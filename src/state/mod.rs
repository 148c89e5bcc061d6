//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds the task list and the draft form
//! - Navigation types (ScreenId, Route, Router)
//! - Date and image picker request state
//! - State error handling

mod error;
mod form;
mod navigation;
mod picker;
mod task;

pub use error::StateError;
pub use form::{FormFocus, FormState};
pub use navigation::{Route, Router, ScreenId};
pub use picker::{DatePicker, ImageRequest, ImageRequestPhase};
pub use task::{NewTask, Task, TaskStore};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{State, PERMISSION_ALERT};
