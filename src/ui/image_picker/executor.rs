use std::sync::Arc;

use crate::data::{GalleryError, GalleryProvider, Permission, PermissionGate};
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{ImagePickerIntent, ImagePickerLabel};
use super::reducer::ImagePickerMessage;
use super::state::ImagePickerState;

#[derive(Debug, Clone)]
pub enum ImagePickerAction {
    /// Bootstrap: follow the media permission and load when it is granted.
    LoadImages,
    MediaAccessChanged(bool),
}

pub struct ImagePickerExecutor {
    gallery: Arc<dyn GalleryProvider>,
    permissions: Arc<dyn PermissionGate>,
    /// Selection the picker was opened with; restored on cancel.
    initial_selection: Vec<String>,
    /// URI removed by the latest click and the index it had.
    last_removed: Option<(String, usize)>,
}

impl ImagePickerExecutor {
    pub fn new(
        gallery: Arc<dyn GalleryProvider>,
        permissions: Arc<dyn PermissionGate>,
        initial_selection: Vec<String>,
    ) -> Self {
        Self {
            gallery,
            permissions,
            initial_selection,
            last_removed: None,
        }
    }

    /// Toggle `uri`. Clicking a URI right after deselecting it puts it back
    /// where it was, so two clicks leave the selection unchanged.
    fn toggle(&mut self, uri: String, scope: &mut ExecutorScope<'_, Self>) {
        let selected = scope.state().selected_images_uri;
        if let Some(index) = selected.iter().position(|s| *s == uri) {
            self.last_removed = Some((uri.clone(), index));
            scope.dispatch(ImagePickerMessage::SelectionToggled(uri));
            return;
        }
        match self.last_removed.take() {
            Some((removed, index)) if removed == uri => {
                scope.dispatch(ImagePickerMessage::SelectionRestored { uri, index })
            }
            _ => scope.dispatch(ImagePickerMessage::SelectionToggled(uri)),
        }
    }
}

impl Executor for ImagePickerExecutor {
    type State = ImagePickerState;
    type Intent = ImagePickerIntent;
    type Action = ImagePickerAction;
    type Message = ImagePickerMessage;
    type Label = ImagePickerLabel;

    fn execute_intent(&mut self, intent: ImagePickerIntent, scope: &mut ExecutorScope<'_, Self>) {
        match intent {
            ImagePickerIntent::ImageClicked(uri) => self.toggle(uri, scope),
            ImagePickerIntent::OpenCameraClicked => {
                let granted = *self.permissions.granted(Permission::Camera).borrow();
                if !granted {
                    tracing::debug!("camera permission denied, not capturing");
                    scope.dispatch(ImagePickerMessage::CaptureFailed(
                        GalleryError::CameraDenied.to_string(),
                    ));
                    return;
                }
                let gallery = Arc::clone(&self.gallery);
                let handle = scope.handle();
                scope.launch(async move {
                    match gallery.capture_photo().await {
                        Ok(Some(uri)) => handle.dispatch(ImagePickerMessage::PhotoCaptured(uri)),
                        Ok(None) => tracing::debug!("camera capture cancelled"),
                        Err(err) => {
                            tracing::warn!("camera capture failed: {}", err);
                            handle.dispatch(ImagePickerMessage::CaptureFailed(err.to_string()));
                        }
                    }
                });
            }
            ImagePickerIntent::ConfirmClicked => {
                let selection = scope.state().selected_images_uri;
                scope.publish(ImagePickerLabel::Confirmed(selection));
            }
            ImagePickerIntent::CancelClicked => {
                self.last_removed = None;
                scope.dispatch(ImagePickerMessage::SelectionReset(
                    self.initial_selection.clone(),
                ));
                scope.publish(ImagePickerLabel::Cancelled);
            }
        }
    }

    fn execute_action(&mut self, action: ImagePickerAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            ImagePickerAction::LoadImages => {
                let mut media = self.permissions.granted(Permission::Media);
                let handle = scope.handle();
                scope.launch(async move {
                    loop {
                        let granted = *media.borrow_and_update();
                        handle.forward(ImagePickerAction::MediaAccessChanged(granted));
                        if media.changed().await.is_err() {
                            break;
                        }
                    }
                });
            }
            ImagePickerAction::MediaAccessChanged(false) => {
                tracing::debug!("media permission denied, gallery not queried");
                scope.dispatch(ImagePickerMessage::LoadFailed(
                    GalleryError::AccessDenied.to_string(),
                ));
            }
            ImagePickerAction::MediaAccessChanged(true) => {
                scope.dispatch(ImagePickerMessage::LoadStarted);
                let gallery = Arc::clone(&self.gallery);
                let handle = scope.handle();
                scope.launch(async move {
                    match gallery.list_image_uris().await {
                        Ok(images) => handle.dispatch(ImagePickerMessage::ImagesLoaded(images)),
                        Err(err) => {
                            tracing::warn!("gallery query failed: {}", err);
                            handle.dispatch(ImagePickerMessage::LoadFailed(err.to_string()));
                        }
                    }
                });
            }
        }
    }
}
