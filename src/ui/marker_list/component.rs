use std::sync::Arc;

use tokio::sync::watch;

use crate::ui::dependencies::Dependencies;
use crate::ui::mvi::{IntentSink, LabelReceiver, Store, StoreOptions};

use super::executor::{MarkerListAction, MarkerListExecutor};
use super::intent::{MarkerListIntent, MarkerListLabel};
use super::reducer::MarkerListReducer;
use super::state::MarkerListState;

pub struct MarkerListComponent {
    store: Store<MarkerListIntent, MarkerListState, MarkerListLabel>,
}

impl MarkerListComponent {
    pub fn new(options: StoreOptions, deps: &Dependencies) -> Self {
        let executor = MarkerListExecutor::new(
            Arc::clone(&deps.markers),
            Arc::clone(&deps.tracker),
            deps.settings.retry,
        );
        let store = Store::create(
            options,
            MarkerListState::default(),
            vec![MarkerListAction::Observe],
            executor,
            MarkerListReducer,
        );
        Self { store }
    }

    pub fn accept(&self, intent: MarkerListIntent) {
        self.store.accept(intent);
    }

    pub fn intent_sink(&self) -> IntentSink<MarkerListIntent> {
        self.store.intent_sink()
    }

    pub fn state(&self) -> MarkerListState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<MarkerListState> {
        self.store.states()
    }

    pub fn labels(&self) -> LabelReceiver<MarkerListLabel> {
        self.store.labels()
    }
}
