use crate::device::{Gallery, ImagePickerOptions, PickerOutcome};
use crate::error::AppResult;
use crate::state::State;
use log::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different device event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    RequestMediaPermission,
    LaunchImageLibrary {
        request_id: u64,
        options: ImagePickerOptions,
    },
    EditImage {
        request_id: u64,
        source: PathBuf,
        options: ImagePickerOptions,
    },
}

/// Specify struct for managing state with device events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    gallery: &'a Gallery,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, gallery: &'a Gallery) -> Self {
        Handler { state, gallery }
    }

    /// Handle device events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> AppResult<()> {
        debug!("Processing device event '{:?}'...", event);
        match event {
            Event::RequestMediaPermission => self.request_media_permission().await,
            Event::LaunchImageLibrary {
                request_id,
                options,
            } => self.launch_image_library(request_id, options).await?,
            Event::EditImage {
                request_id,
                source,
                options,
            } => self.edit_image(request_id, source, options).await?,
        }
        Ok(())
    }

    /// Update state with the gallery permission status.
    ///
    async fn request_media_permission(&mut self) {
        info!("Requesting gallery permission...");
        let status = self.gallery.request_permission().await;
        let mut state = self.state.lock().await;
        state.set_media_permission(status);
    }

    /// Scan the gallery and hand the entries to the picker.
    ///
    async fn launch_image_library(
        &mut self,
        request_id: u64,
        options: ImagePickerOptions,
    ) -> AppResult<()> {
        info!("Scanning gallery for request {}...", request_id);
        match self.gallery.scan(&options).await {
            Ok(entries) => {
                info!("Found {} gallery entries.", entries.len());
                let mut state = self.state.lock().await;
                state.open_gallery(request_id, entries);
                Ok(())
            }
            Err(e) => {
                self.dismiss(request_id, "Could not read the image gallery.")
                    .await;
                Err(e.into())
            }
        }
    }

    /// Crop and cache the chosen image, then resolve the request.
    ///
    async fn edit_image(
        &mut self,
        request_id: u64,
        source: PathBuf,
        options: ImagePickerOptions,
    ) -> AppResult<()> {
        info!("Preparing image {}...", source.display());
        match self.gallery.edit(&source, &options).await {
            Ok(image) => {
                let mut state = self.state.lock().await;
                state.resolve_image_request(request_id, PickerOutcome::Selected(image));
                Ok(())
            }
            Err(e) => {
                self.dismiss(request_id, "Could not load the selected image.")
                    .await;
                Err(e.into())
            }
        }
    }

    async fn dismiss(&mut self, request_id: u64, message: &str) {
        let mut state = self.state.lock().await;
        state.fail_image_request(request_id, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ImageRef, PermissionStatus};
    use crate::error::AppError;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn shared(state: State) -> Arc<Mutex<State>> {
        Arc::new(Mutex::new(state))
    }

    #[tokio::test]
    async fn permission_denied_for_missing_gallery() {
        let dir = tempdir().unwrap();
        let gallery = Gallery::new(dir.path().join("missing"), dir.path().join("cache"));
        let state = shared(State::default());
        let mut handler = Handler::new(&state, &gallery);
        handler.handle(Event::RequestMediaPermission).await.unwrap();
        let state = state.lock().await;
        assert_eq!(state.media_permission(), PermissionStatus::Denied);
        assert!(state.get_alert().is_some());
    }

    #[tokio::test]
    async fn full_picker_flow_attaches_image() {
        let dir = tempdir().unwrap();
        let gallery_dir = dir.path().join("gallery");
        std::fs::create_dir_all(&gallery_dir).unwrap();
        RgbImage::from_pixel(40, 40, Rgb([10, 20, 30]))
            .save(gallery_dir.join("square.png"))
            .unwrap();
        let gallery = Gallery::new(gallery_dir, dir.path().join("cache"));
        let state = shared(State::default());

        let request_id = {
            let mut state = state.lock().await;
            state.set_media_permission(PermissionStatus::Granted);
            state.select_image();
            state.get_image_request().unwrap().id()
        };
        let mut handler = Handler::new(&state, &gallery);
        handler
            .handle(Event::LaunchImageLibrary {
                request_id,
                options: ImagePickerOptions::default(),
            })
            .await
            .unwrap();
        let source = {
            let state = state.lock().await;
            let request = state.get_image_request().unwrap();
            assert!(request.is_browsing());
            request.selected_entry().unwrap().path.clone()
        };
        handler
            .handle(Event::EditImage {
                request_id,
                source,
                options: ImagePickerOptions::default(),
            })
            .await
            .unwrap();

        let state = state.lock().await;
        assert!(!state.is_image_request_in_flight());
        let image = state.form().image().unwrap();
        assert!(image.uri.ends_with(".png"));
        assert!(image.thumbnail.is_some());
    }

    #[tokio::test]
    async fn unreadable_gallery_dismisses_request() {
        let dir = tempdir().unwrap();
        let gallery = Gallery::new(dir.path().join("missing"), dir.path().join("cache"));
        let state = shared(State::default());
        let previous = ImageRef {
            uri: "/cache/old.png".to_string(),
            thumbnail: None,
        };
        let request_id = {
            let mut state = state.lock().await;
            state.select_image();
            let request_id = state.get_image_request().unwrap().id();
            state.resolve_image_request(request_id, PickerOutcome::Selected(previous.clone()));
            state.select_image();
            state.get_image_request().unwrap().id()
        };

        let mut handler = Handler::new(&state, &gallery);
        let result = handler
            .handle(Event::LaunchImageLibrary {
                request_id,
                options: ImagePickerOptions::default(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Device(_))));
        let state = state.lock().await;
        assert!(!state.is_image_request_in_flight());
        assert_eq!(state.form().image(), Some(&previous));
        assert_eq!(
            state.get_status_message(),
            Some("Could not read the image gallery.")
        );
    }

    #[tokio::test]
    async fn failure_for_stale_request_sets_no_message() {
        let dir = tempdir().unwrap();
        let gallery = Gallery::new(dir.path().join("missing"), dir.path().join("cache"));
        let state = shared(State::default());
        let current = {
            let mut state = state.lock().await;
            state.select_image();
            state.get_image_request().unwrap().id()
        };

        let mut handler = Handler::new(&state, &gallery);
        let result = handler
            .handle(Event::LaunchImageLibrary {
                request_id: current + 1,
                options: ImagePickerOptions::default(),
            })
            .await;
        assert!(result.is_err());
        let state = state.lock().await;
        assert!(state.is_image_request_in_flight());
        assert_eq!(state.get_status_message(), None);
    }

    #[tokio::test]
    async fn failed_edit_dismisses_request() {
        let dir = tempdir().unwrap();
        let gallery_dir = dir.path().join("gallery");
        std::fs::create_dir_all(&gallery_dir).unwrap();
        let broken = gallery_dir.join("broken.png");
        std::fs::write(&broken, b"not an image").unwrap();
        let gallery = Gallery::new(gallery_dir, dir.path().join("cache"));
        let state = shared(State::default());
        let request_id = {
            let mut state = state.lock().await;
            state.select_image();
            state.get_image_request().unwrap().id()
        };

        let mut handler = Handler::new(&state, &gallery);
        let result = handler
            .handle(Event::EditImage {
                request_id,
                source: broken,
                options: ImagePickerOptions::default(),
            })
            .await;
        assert!(result.is_err());
        let state = state.lock().await;
        assert!(!state.is_image_request_in_flight());
        assert_eq!(state.form().image(), None);
    }
}
