use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::MarkerId;
use crate::ui::dependencies::Dependencies;
use crate::ui::mvi::{IntentSink, LabelReceiver, Store, StoreOptions};

use super::executor::{MarkerDetailsAction, MarkerDetailsExecutor};
use super::intent::{MarkerDetailsIntent, MarkerDetailsLabel};
use super::reducer::MarkerDetailsReducer;
use super::state::MarkerDetailsState;

pub struct MarkerDetailsComponent {
    store: Store<MarkerDetailsIntent, MarkerDetailsState, MarkerDetailsLabel>,
}

impl MarkerDetailsComponent {
    pub fn new(options: StoreOptions, marker_id: MarkerId, deps: &Dependencies) -> Self {
        let initial = MarkerDetailsState {
            marker_id,
            ..MarkerDetailsState::default()
        };
        let store = Store::create(
            options,
            initial,
            vec![MarkerDetailsAction::Observe(marker_id)],
            MarkerDetailsExecutor::new(Arc::clone(&deps.markers)),
            MarkerDetailsReducer,
        );
        Self { store }
    }

    pub fn marker_id(&self) -> MarkerId {
        self.store.state().marker_id
    }

    pub fn accept(&self, intent: MarkerDetailsIntent) {
        self.store.accept(intent);
    }

    pub fn intent_sink(&self) -> IntentSink<MarkerDetailsIntent> {
        self.store.intent_sink()
    }

    pub fn state(&self) -> MarkerDetailsState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<MarkerDetailsState> {
        self.store.states()
    }

    pub fn labels(&self) -> LabelReceiver<MarkerDetailsLabel> {
        self.store.labels()
    }
}
