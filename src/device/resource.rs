use std::path::PathBuf;

/// Outcome of a picker surface: a chosen value or a dismissal.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerOutcome<T> {
    Selected(T),
    Dismissed,
}

/// Result of the gallery permission check.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// What the date picker lets the user choose.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePickerMode {
    Date,
}

/// How the date picker is presented.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePickerDisplay {
    Default, // Month grid in a modal
}

/// Fixed configuration for the date picker.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatePickerOptions {
    pub mode: DatePickerMode,
    pub display: DatePickerDisplay,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        DatePickerOptions {
            mode: DatePickerMode::Date,
            display: DatePickerDisplay::Default,
        }
    }
}

/// Fixed configuration for the image picker.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePickerOptions {
    pub images_only: bool,
    pub allows_editing: bool,
    pub aspect: (u32, u32),
    pub quality: f32, // 0.0..=1.0, 1.0 keeps the image lossless
}

impl Default for ImagePickerOptions {
    fn default() -> Self {
        ImagePickerOptions {
            images_only: true,
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
        }
    }
}

/// Defines a selectable gallery file.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub name: String,
}

/// Defines an RGB colour sample.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Small colour grid rendered next to a task.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<Rgb>, // row-major, width * height
}

impl Thumbnail {
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Reference to a picked image copied into the local cache.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub uri: String,
    pub thumbnail: Option<Thumbnail>,
}

impl ImageRef {
    /// Return the file name part of the URI.
    ///
    pub fn file_name(&self) -> &str {
        self.uri
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.uri)
    }
}
