use std::sync::Arc;
use std::time::Duration;

use crate::data::MarkerRepository;
use crate::domain::{validate_marker_form, CameraPosition, GeoMarker, NEW_MARKER_ID};
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{EditorIntent, EditorLabel};
use super::reducer::EditorMessage;
use super::state::{EditorMode, EditorState, SaveStatus};

#[derive(Debug, Clone)]
pub enum EditorAction {
    /// Edit-mode bootstrap: point the camera at the marker after `delay`,
    /// giving the map time to attach.
    RestoreCamera {
        camera: CameraPosition,
        delay: Duration,
    },
}

pub struct EditorExecutor {
    repository: Arc<dyn MarkerRepository>,
}

impl EditorExecutor {
    pub fn new(repository: Arc<dyn MarkerRepository>) -> Self {
        Self { repository }
    }

    fn save(&self, scope: &mut ExecutorScope<'_, Self>) {
        let state = scope.state();
        if state.save_status == SaveStatus::Saving {
            tracing::debug!("save already in flight");
            return;
        }

        let errors = validate_marker_form(&state.title, &state.description);
        let valid = errors.is_valid();
        scope.dispatch(EditorMessage::Validated(errors));
        if !valid {
            tracing::debug!("marker form invalid, not saving");
            return;
        }

        let Some(location) = state.location else {
            tracing::debug!("no location picked yet, save is waiting");
            scope.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::AwaitingLocation));
            return;
        };

        let marker = to_marker(&state, location);
        scope.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Saving));
        let repository = Arc::clone(&self.repository);
        let handle = scope.handle();
        scope.launch(async move {
            match repository.save_marker(&marker).await {
                Ok(id) => {
                    tracing::info!(marker_id = id, "marker saved");
                    handle.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Idle));
                    handle.publish(EditorLabel::Saved(id));
                }
                Err(err) => {
                    tracing::error!("failed to save marker: {}", err);
                    handle.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Failed(
                        err.to_string(),
                    )));
                }
            }
        });
    }

    fn delete(&self, scope: &mut ExecutorScope<'_, Self>) {
        let state = scope.state();
        let id = match (state.mode, state.marker_id) {
            (EditorMode::Edit, Some(id)) => id,
            _ => {
                tracing::debug!("nothing to delete in add mode");
                return;
            }
        };
        if state.save_status == SaveStatus::Saving {
            return;
        }

        scope.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Saving));
        let repository = Arc::clone(&self.repository);
        let handle = scope.handle();
        scope.launch(async move {
            match repository.delete_marker(id).await {
                Ok(()) => {
                    tracing::info!(marker_id = id, "marker deleted");
                    handle.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Idle));
                    handle.publish(EditorLabel::Deleted(id));
                }
                Err(err) => {
                    tracing::error!(marker_id = id, "failed to delete marker: {}", err);
                    handle.dispatch(EditorMessage::SaveStatusChanged(SaveStatus::Failed(
                        err.to_string(),
                    )));
                }
            }
        });
    }
}

fn to_marker(state: &EditorState, location: CameraPosition) -> GeoMarker {
    GeoMarker {
        id: state.marker_id.unwrap_or(NEW_MARKER_ID),
        title: state.title.clone(),
        description: state.description.clone(),
        latitude: location.target.latitude,
        longitude: location.target.longitude,
        images_uri: state.selected_images.clone(),
    }
}

impl Executor for EditorExecutor {
    type State = EditorState;
    type Intent = EditorIntent;
    type Action = EditorAction;
    type Message = EditorMessage;
    type Label = EditorLabel;

    fn execute_intent(&mut self, intent: EditorIntent, scope: &mut ExecutorScope<'_, Self>) {
        match intent {
            EditorIntent::TitleChanged(title) => scope.dispatch(EditorMessage::TitleChanged(title)),
            EditorIntent::DescriptionChanged(description) => {
                scope.dispatch(EditorMessage::DescriptionChanged(description))
            }
            EditorIntent::LocationChanged(camera) => {
                scope.dispatch(EditorMessage::LocationChanged(camera))
            }
            EditorIntent::SaveClicked => self.save(scope),
            EditorIntent::DeleteClicked => self.delete(scope),
            EditorIntent::AddImagesClicked => {
                let selection = scope.state().selected_images;
                scope.dispatch(EditorMessage::ImagePickerShown(true));
                scope.publish(EditorLabel::OpenImagePicker(selection));
            }
            EditorIntent::RemoveImage(uri) => scope.dispatch(EditorMessage::ImageRemoved(uri)),
            EditorIntent::ImagesPicked(images) => {
                scope.dispatch(EditorMessage::ImagesReplaced(images));
                scope.dispatch(EditorMessage::ImagePickerShown(false));
            }
            EditorIntent::ImagePickerDismissed => {
                scope.dispatch(EditorMessage::ImagePickerShown(false))
            }
            EditorIntent::BackClicked => scope.publish(EditorLabel::Back),
        }
    }

    fn execute_action(&mut self, action: EditorAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            EditorAction::RestoreCamera { camera, delay } => {
                let handle = scope.handle();
                scope.launch(async move {
                    tokio::time::sleep(delay).await;
                    handle.dispatch(EditorMessage::LocationChanged(camera));
                });
            }
        }
    }
}
