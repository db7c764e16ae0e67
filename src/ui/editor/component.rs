use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::data::{GalleryProvider, Permission, PermissionGate};
use crate::domain::{CameraPosition, GeoMarker, MarkerId, DEFAULT_ZOOM};
use crate::ui::dependencies::Dependencies;
use crate::ui::image_picker::{
    ImagePickerComponent, ImagePickerIntent, ImagePickerLabel, ImagePickerState,
};
use crate::ui::map::{MapComponent, MapDependencies, MapIntent, MapLabel};
use crate::ui::mvi::{IntentSink, Output, Store, StoreOptions, TaskScope};

use super::executor::{EditorAction, EditorExecutor};
use super::intent::{EditorIntent, EditorLabel};
use super::reducer::EditorReducer;
use super::state::EditorState;

/// What the editor reports to whoever opened it.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutput {
    Saved(MarkerId),
    Deleted(MarkerId),
    Back,
}

type PickerSlot = Arc<Mutex<Option<ImagePickerComponent>>>;

/// Add/edit screen.
///
/// The editor's `location` and the map child's camera follow each other:
/// the map's significance test stops the echo after one round trip.
pub struct EditorComponent {
    store: Store<EditorIntent, EditorState, EditorLabel>,
    map: MapComponent,
    picker: PickerSlot,
    scope: Arc<TaskScope>,
}

impl EditorComponent {
    /// `marker` is `None` for a new marker.
    pub fn new(
        marker: Option<GeoMarker>,
        deps: &Dependencies,
        output: impl Fn(EditorOutput) + Send + Sync + 'static,
    ) -> Self {
        let settings = deps.settings;
        let adding = marker.is_none();
        let (initial, bootstrap) = match &marker {
            Some(marker) => (
                EditorState::edit(marker),
                vec![EditorAction::RestoreCamera {
                    camera: CameraPosition::centered(marker.position(), DEFAULT_ZOOM),
                    delay: settings.camera_restore_delay,
                }],
            ),
            None => (EditorState::add(), Vec::new()),
        };
        tracing::debug!(marker_id = ?marker.as_ref().map(|m| m.id), "opening editor");

        let store = Store::create(
            settings.store_options("editor"),
            initial,
            bootstrap,
            EditorExecutor::new(Arc::clone(&deps.markers)),
            EditorReducer,
        );
        let map = MapComponent::new(
            settings.store_options("editor-map"),
            MapDependencies {
                tracker: Arc::clone(&deps.tracker),
                last_position: None,
                location_interval: settings.location_interval,
            },
        );
        let picker: PickerSlot = Arc::new(Mutex::new(None));
        let scope = Arc::new(TaskScope::new());
        let output: Output<EditorOutput> = Arc::new(output);

        // Form location → map camera. Also closes a picker the form dismissed.
        let map_sink = map.intent_sink();
        let picker_for_state = Arc::clone(&picker);
        let mut last_location = None;
        let mut picker_shown = false;
        scope.observe(store.states(), move |state: EditorState| {
            if state.location != last_location {
                last_location = state.location;
                if let Some(camera) = state.location {
                    map_sink.accept(MapIntent::UpdateCameraPosition(camera));
                }
            }
            if picker_shown && !state.show_image_picker {
                picker_for_state.lock().take();
            }
            picker_shown = state.show_image_picker;
        });

        // A new marker starts at the device position once there is a fix.
        // The tracker is shared, so a second start is a no-op and revoking
        // is left to the main screen.
        if adding {
            let map_sink = map.intent_sink();
            scope.observe(
                deps.permissions.granted(Permission::Location),
                move |granted: bool| {
                    if granted {
                        map_sink.accept(MapIntent::StartLocationUpdates);
                    }
                },
            );
        }

        // Map camera → form location.
        let editor_sink = store.intent_sink();
        scope.forward_labels(map.labels(), move |label| {
            if let MapLabel::CameraChanged(camera) = label {
                editor_sink.accept(EditorIntent::LocationChanged(camera));
            }
        });

        let opener = PickerOpener {
            slot: Arc::clone(&picker),
            scope: Arc::downgrade(&scope),
            editor: store.intent_sink(),
            gallery: Arc::clone(&deps.gallery),
            permissions: Arc::clone(&deps.permissions),
            options: settings.store_options("image-picker"),
        };
        scope.forward_labels(store.labels(), move |label| match label {
            EditorLabel::OpenImagePicker(selection) => opener.open(selection),
            EditorLabel::Saved(id) => output(EditorOutput::Saved(id)),
            EditorLabel::Deleted(id) => output(EditorOutput::Deleted(id)),
            EditorLabel::Back => output(EditorOutput::Back),
        });

        Self {
            store,
            map,
            picker,
            scope,
        }
    }

    pub fn accept(&self, intent: EditorIntent) {
        self.store.accept(intent);
    }

    pub fn state(&self) -> EditorState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<EditorState> {
        self.store.states()
    }

    pub fn map(&self) -> &MapComponent {
        &self.map
    }

    /// Intent entry of the open image picker, if any.
    pub fn image_picker(&self) -> Option<IntentSink<ImagePickerIntent>> {
        self.picker.lock().as_ref().map(ImagePickerComponent::intent_sink)
    }

    pub fn image_picker_state(&self) -> Option<ImagePickerState> {
        self.picker.lock().as_ref().map(ImagePickerComponent::state)
    }

    pub async fn settled(&self) {
        self.store.settled().await;
        self.map.settled().await;
    }

    pub fn dispose(&self) {
        self.scope.cancel();
        self.picker.lock().take();
        self.map.dispose();
        self.store.dispose();
    }
}

impl Drop for EditorComponent {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Creates the image picker child when the editor asks for it.
struct PickerOpener {
    slot: PickerSlot,
    scope: Weak<TaskScope>,
    editor: IntentSink<EditorIntent>,
    gallery: Arc<dyn GalleryProvider>,
    permissions: Arc<dyn PermissionGate>,
    options: StoreOptions,
}

impl PickerOpener {
    fn open(&self, selection: Vec<String>) {
        let Some(scope) = self.scope.upgrade() else {
            return;
        };
        let picker = ImagePickerComponent::new(
            self.options,
            Arc::clone(&self.gallery),
            Arc::clone(&self.permissions),
            selection,
        );

        let slot = Arc::clone(&self.slot);
        let editor = self.editor.clone();
        scope.forward_labels(picker.labels(), move |label| {
            slot.lock().take();
            editor.accept(match label {
                ImagePickerLabel::Confirmed(images) => EditorIntent::ImagesPicked(images),
                ImagePickerLabel::Cancelled => EditorIntent::ImagePickerDismissed,
            });
        });

        if self.slot.lock().replace(picker).is_some() {
            tracing::debug!("replaced an image picker that was still open");
        }
    }
}
