//! Media file helpers.

use log::*;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const IMAGE_EXTENSION_PATTERN: &str = r"(?i)\.(png|jpe?g|gif|bmp|webp)$";

fn image_extension_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(IMAGE_EXTENSION_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(
                    "Failed to compile regex pattern '{}': {}",
                    IMAGE_EXTENSION_PATTERN, e
                );
                None
            }
        })
        .as_ref()
}

/// Whether the path names a supported image file, judged by extension.
///
pub fn is_image_file(path: &Path) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return false,
    };
    image_extension_regex()
        .map(|re| re.is_match(&name))
        .unwrap_or(false)
}
