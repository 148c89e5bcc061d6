use super::error::DeviceError;
use super::resource::{
    GalleryEntry, ImagePickerOptions, ImageRef, PermissionStatus, Rgb, Thumbnail,
};
use crate::utils::media::is_image_file;
use image::{codecs::jpeg::JpegEncoder, DynamicImage, ExtendedColorType, ImageFormat};
use log::*;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Thumbnail size in pixels. Two pixel rows share one terminal cell.
///
pub const THUMBNAIL_WIDTH: u32 = 8;
pub const THUMBNAIL_HEIGHT: u32 = 6;

/// Responsible for asynchronous access to the image gallery directory and
/// the local cache of edited images.
///
pub struct Gallery {
    root: PathBuf,
    cache_dir: PathBuf,
}

impl Gallery {
    /// Returns a new instance reading from `root` and writing edited copies
    /// into `cache_dir`.
    ///
    pub fn new(root: PathBuf, cache_dir: PathBuf) -> Gallery {
        debug!(
            "Initializing gallery at {} with cache {}...",
            root.display(),
            cache_dir.display()
        );
        Gallery { root, cache_dir }
    }

    /// Check whether the gallery can be read.
    ///
    pub async fn request_permission(&self) -> PermissionStatus {
        debug!("Requesting read access to {}...", self.root.display());
        match tokio::fs::read_dir(&self.root).await {
            Ok(_) => PermissionStatus::Granted,
            Err(e) => {
                warn!("Gallery {} is not readable: {}", self.root.display(), e);
                PermissionStatus::Denied
            }
        }
    }

    /// Returns the gallery files matching the picker options, sorted by name.
    ///
    pub async fn scan(
        &self,
        options: &ImagePickerOptions,
    ) -> Result<Vec<GalleryEntry>, DeviceError> {
        debug!("Scanning gallery {}...", self.root.display());
        let unavailable = |source| DeviceError::GalleryUnavailable {
            path: self.root.clone(),
            source,
        };
        let mut dir = tokio::fs::read_dir(&self.root).await.map_err(unavailable)?;
        let mut entries = vec![];
        while let Some(entry) = dir.next_entry().await.map_err(unavailable)? {
            let file_type = entry.file_type().await.map_err(unavailable)?;
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            if options.images_only && !is_image_file(&path) {
                continue;
            }
            entries.push(GalleryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} gallery entries.", entries.len());
        Ok(entries)
    }

    /// Decode `source`, apply the picker edits, store the result in the cache
    /// and return a reference to the cached copy.
    ///
    pub async fn edit(
        &self,
        source: &Path,
        options: &ImagePickerOptions,
    ) -> Result<ImageRef, DeviceError> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| DeviceError::CacheWrite {
                path: self.cache_dir.clone(),
                source: e,
            })?;
        let target = self.cache_path_for(source, options);
        debug!(
            "Editing {} into {}...",
            source.display(),
            target.display()
        );

        let source = source.to_path_buf();
        let options = options.clone();
        let destination = target.clone();
        let thumbnail =
            tokio::task::spawn_blocking(move || process_image(&source, &destination, &options))
                .await
                .map_err(|e| DeviceError::Task(e.to_string()))??;

        Ok(ImageRef {
            uri: target.to_string_lossy().into_owned(),
            thumbnail: Some(thumbnail),
        })
    }

    fn cache_path_for(&self, source: &Path, options: &ImagePickerOptions) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let extension = if options.quality >= 1.0 { "png" } else { "jpg" };
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
        self.cache_dir
            .join(format!("{}-{}.{}", stem, stamp, extension))
    }
}

fn process_image(
    source: &Path,
    target: &Path,
    options: &ImagePickerOptions,
) -> Result<Thumbnail, DeviceError> {
    let image = image::open(source)?;
    let image = if options.allows_editing {
        crop_to_aspect(&image, options.aspect)
    } else {
        image
    };
    write_image(&image, target, options.quality)?;
    Ok(build_thumbnail(&image, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT))
}

/// Center-crop the image to the given width:height aspect.
///
pub fn crop_to_aspect(image: &DynamicImage, aspect: (u32, u32)) -> DynamicImage {
    let (width, height) = (image.width() as u64, image.height() as u64);
    let (aspect_w, aspect_h) = (aspect.0.max(1) as u64, aspect.1.max(1) as u64);
    if width * aspect_h > height * aspect_w {
        let cropped_width = (height * aspect_w / aspect_h).max(1).min(width);
        let x = (width - cropped_width) / 2;
        image.crop_imm(x as u32, 0, cropped_width as u32, height as u32)
    } else {
        let cropped_height = (width * aspect_h / aspect_w).max(1).min(height);
        let y = (height - cropped_height) / 2;
        image.crop_imm(0, y as u32, width as u32, cropped_height as u32)
    }
}

/// Write the image as lossless PNG at full quality, JPEG otherwise.
///
fn write_image(image: &DynamicImage, target: &Path, quality: f32) -> Result<(), DeviceError> {
    if quality >= 1.0 {
        image.save_with_format(target, ImageFormat::Png)?;
        return Ok(());
    }
    let cache_write = |source| DeviceError::CacheWrite {
        path: target.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(target).map_err(cache_write)?;
    let mut writer = std::io::BufWriter::new(file);
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let rgb = image.to_rgb8();
    JpegEncoder::new_with_quality(&mut writer, quality).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    writer.flush().map_err(cache_write)?;
    Ok(())
}

/// Downsample the image to a fixed colour grid.
///
pub fn build_thumbnail(image: &DynamicImage, width: u32, height: u32) -> Thumbnail {
    let small = image.thumbnail_exact(width, height).to_rgb8();
    let pixels = small
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            Rgb(r, g, b)
        })
        .collect();
    Thumbnail {
        width: small.width() as u16,
        height: small.height() as u16,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage};
    use tempfile::tempdir;

    fn write_red_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, image::Rgb([255, 0, 0]))
            .save(path)
            .unwrap();
    }

    #[tokio::test]
    async fn permission_follows_directory_access() {
        let dir = tempdir().unwrap();
        let gallery = Gallery::new(dir.path().to_path_buf(), dir.path().join("cache"));
        assert_eq!(gallery.request_permission().await, PermissionStatus::Granted);

        let gallery = Gallery::new(dir.path().join("missing"), dir.path().join("cache"));
        assert_eq!(gallery.request_permission().await, PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn scan_lists_only_images() {
        let dir = tempdir().unwrap();
        write_red_png(&dir.path().join("b.png"), 4, 4);
        write_red_png(&dir.path().join("a.PNG"), 4, 4);
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::create_dir(dir.path().join("album.png")).unwrap();

        let gallery = Gallery::new(dir.path().to_path_buf(), dir.path().join("cache"));
        let entries = gallery.scan(&ImagePickerOptions::default()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);

        let options = ImagePickerOptions {
            images_only: false,
            ..ImagePickerOptions::default()
        };
        let entries = gallery.scan(&options).await.unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn scan_missing_gallery_fails() {
        let dir = tempdir().unwrap();
        let gallery = Gallery::new(dir.path().join("missing"), dir.path().join("cache"));
        let result = gallery.scan(&ImagePickerOptions::default()).await;
        assert!(matches!(result, Err(DeviceError::GalleryUnavailable { .. })));
    }

    #[tokio::test]
    async fn edit_crops_and_caches_png() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("wide.png");
        write_red_png(&source, 80, 40);
        let gallery = Gallery::new(dir.path().to_path_buf(), dir.path().join("cache"));

        let image = gallery
            .edit(&source, &ImagePickerOptions::default())
            .await
            .unwrap();
        assert!(image.uri.ends_with(".png"));
        assert!(image.file_name().starts_with("wide-"));
        let cached = image::open(&image.uri).unwrap();
        assert_eq!(cached.dimensions(), (53, 40));

        let thumbnail = image.thumbnail.unwrap();
        assert_eq!(thumbnail.width, THUMBNAIL_WIDTH as u16);
        assert_eq!(thumbnail.height, THUMBNAIL_HEIGHT as u16);
        assert!(thumbnail.pixels.iter().all(|p| *p == Rgb(255, 0, 0)));
    }

    #[tokio::test]
    async fn edit_with_reduced_quality_writes_jpeg() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tall.png");
        write_red_png(&source, 30, 90);
        let gallery = Gallery::new(dir.path().to_path_buf(), dir.path().join("cache"));
        let options = ImagePickerOptions {
            quality: 0.5,
            ..ImagePickerOptions::default()
        };

        let image = gallery.edit(&source, &options).await.unwrap();
        assert!(image.uri.ends_with(".jpg"));
        let cached = image::open(&image.uri).unwrap();
        assert_eq!(cached.dimensions(), (30, 22));
    }

    #[tokio::test]
    async fn edit_rejects_non_images() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("fake.png");
        std::fs::write(&source, "not an image").unwrap();
        let gallery = Gallery::new(dir.path().to_path_buf(), dir.path().join("cache"));
        let result = gallery.edit(&source, &ImagePickerOptions::default()).await;
        assert!(matches!(result, Err(DeviceError::Image(_))));
    }

    #[test]
    fn crop_keeps_matching_aspect() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(40, 30));
        assert_eq!(crop_to_aspect(&image, (4, 3)).dimensions(), (40, 30));
        let image = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
        assert_eq!(crop_to_aspect(&image, (4, 3)).dimensions(), (40, 30));
    }
}
