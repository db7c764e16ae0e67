use std::sync::Arc;

use tokio::sync::watch;

use crate::data::{GalleryProvider, PermissionGate};
use crate::ui::mvi::{IntentSink, LabelReceiver, Store, StoreOptions};

use super::executor::{ImagePickerAction, ImagePickerExecutor};
use super::intent::{ImagePickerIntent, ImagePickerLabel};
use super::reducer::ImagePickerReducer;
use super::state::ImagePickerState;

/// Multi-select image picker, opened pre-seeded with a selection.
pub struct ImagePickerComponent {
    store: Store<ImagePickerIntent, ImagePickerState, ImagePickerLabel>,
}

impl ImagePickerComponent {
    pub fn new(
        options: StoreOptions,
        gallery: Arc<dyn GalleryProvider>,
        permissions: Arc<dyn PermissionGate>,
        selected_images_uri: Vec<String>,
    ) -> Self {
        let initial = ImagePickerState {
            selected_images_uri: selected_images_uri.clone(),
            ..ImagePickerState::default()
        };
        let executor = ImagePickerExecutor::new(gallery, permissions, selected_images_uri);
        let store = Store::create(
            options,
            initial,
            vec![ImagePickerAction::LoadImages],
            executor,
            ImagePickerReducer,
        );
        Self { store }
    }

    pub fn accept(&self, intent: ImagePickerIntent) {
        self.store.accept(intent);
    }

    pub fn intent_sink(&self) -> IntentSink<ImagePickerIntent> {
        self.store.intent_sink()
    }

    pub fn state(&self) -> ImagePickerState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<ImagePickerState> {
        self.store.states()
    }

    pub fn labels(&self) -> LabelReceiver<ImagePickerLabel> {
        self.store.labels()
    }

    pub async fn settled(&self) {
        self.store.settled().await;
    }
}
