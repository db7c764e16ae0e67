use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::data::LastPositionRepository;
use crate::location::LocationTracker;
use crate::ui::mvi::{IntentSink, LabelReceiver, Store, StoreOptions};

use super::executor::{MapAction, MapExecutor};
use super::intent::{MapIntent, MapLabel};
use super::reducer::MapReducer;
use super::state::MapState;

pub struct MapDependencies {
    pub tracker: Arc<LocationTracker>,
    /// When set, the camera starts at the stored position and every
    /// applied camera change is written back.
    pub last_position: Option<Arc<dyn LastPositionRepository>>,
    pub location_interval: Duration,
}

/// Map view model: a thin wrapper around the map store.
pub struct MapComponent {
    store: Store<MapIntent, MapState, MapLabel>,
}

impl MapComponent {
    pub fn new(options: StoreOptions, deps: MapDependencies) -> Self {
        let bootstrap = if deps.last_position.is_some() {
            vec![MapAction::RestoreLastPosition]
        } else {
            Vec::new()
        };
        let executor = MapExecutor::new(deps.tracker, deps.last_position, deps.location_interval);
        let store = Store::create(options, MapState::default(), bootstrap, executor, MapReducer);
        Self { store }
    }

    pub fn accept(&self, intent: MapIntent) {
        self.store.accept(intent);
    }

    pub fn intent_sink(&self) -> IntentSink<MapIntent> {
        self.store.intent_sink()
    }

    pub fn state(&self) -> MapState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<MapState> {
        self.store.states()
    }

    pub fn labels(&self) -> LabelReceiver<MapLabel> {
        self.store.labels()
    }

    pub async fn settled(&self) {
        self.store.settled().await;
    }

    pub fn dispose(&self) {
        self.store.dispose();
    }
}
