use std::sync::Arc;

use tokio::sync::watch;

use crate::data::Permission;
use crate::domain::{GeoMarker, MarkerId};
use crate::ui::dependencies::Dependencies;
use crate::ui::map::{MapComponent, MapDependencies, MapIntent, MapLabel};
use crate::ui::mvi::{Output, Store, TaskScope};
use crate::ui::sheet::{SheetComponent, SheetOutput};

use super::executor::{GeoMarkerAction, GeoMarkerExecutor};
use super::intent::{GeoMarkerIntent, GeoMarkerLabel};
use super::reducer::GeoMarkerReducer;
use super::state::GeoMarkerState;

#[derive(Debug, Clone, PartialEq)]
pub enum GeoMarkerOutput {
    AddMarker,
    EditMarker(GeoMarker),
}

/// Main screen.
///
/// Owns the map and the bottom sheet. Children never talk to each other:
/// their labels come here, become intents on this store, and the store's
/// state drives both children.
pub struct GeoMarkerComponent {
    store: Store<GeoMarkerIntent, GeoMarkerState, GeoMarkerLabel>,
    map: MapComponent,
    sheet: Arc<SheetComponent>,
    scope: TaskScope,
}

impl GeoMarkerComponent {
    pub fn new(
        deps: Arc<Dependencies>,
        output: impl Fn(GeoMarkerOutput) + Send + Sync + 'static,
    ) -> Self {
        let settings = deps.settings;
        let output: Output<GeoMarkerOutput> = Arc::new(output);

        let store = Store::create(
            settings.store_options("geomarker"),
            GeoMarkerState::default(),
            vec![GeoMarkerAction::ObserveMarkers],
            GeoMarkerExecutor::new(Arc::clone(&deps.markers), settings.retry),
            GeoMarkerReducer,
        );
        let map = MapComponent::new(
            settings.store_options("map"),
            MapDependencies {
                tracker: Arc::clone(&deps.tracker),
                last_position: Some(Arc::clone(&deps.last_position)),
                location_interval: settings.location_interval,
            },
        );

        let sheet_intents = store.intent_sink();
        let sheet_output = Arc::clone(&output);
        let sheet = Arc::new(SheetComponent::new(Arc::clone(&deps), move |event| match event {
            SheetOutput::MarkerSelected(id) => {
                sheet_intents.accept(GeoMarkerIntent::SelectMarker(id))
            }
            SheetOutput::EditMarker(marker) => sheet_output(GeoMarkerOutput::EditMarker(marker)),
            SheetOutput::DetailsClosed => sheet_intents.accept(GeoMarkerIntent::ClearSelection),
        }));

        let scope = TaskScope::new();

        // Store state → map overlay, map camera and sheet page.
        let map_sink = map.intent_sink();
        let sheet_for_state = Arc::clone(&sheet);
        let mut shown_markers: Option<Vec<GeoMarker>> = None;
        let mut shown_selection: Option<MarkerId> = None;
        scope.observe(store.states(), move |state: GeoMarkerState| {
            let markers = state.markers.markers();
            if shown_markers.as_deref() != Some(markers) {
                shown_markers = Some(markers.to_vec());
                map_sink.accept(MapIntent::SetMarkers(markers.to_vec()));
            }

            if state.selected_marker_id == shown_selection {
                return;
            }
            shown_selection = state.selected_marker_id;
            match state.selected_marker_id {
                Some(id) => {
                    sheet_for_state.show_details(id);
                    if let Some(marker) = state.selected_marker() {
                        map_sink.accept(MapIntent::CenterOn(marker.position()));
                    }
                    map_sink.accept(MapIntent::HighlightMarker(Some(id)));
                }
                None => {
                    sheet_for_state.close_details();
                    map_sink.accept(MapIntent::HighlightMarker(None));
                }
            }
        });

        let map_intents = store.intent_sink();
        scope.forward_labels(map.labels(), move |label| match label {
            MapLabel::MarkerClicked(id) => map_intents.accept(GeoMarkerIntent::SelectMarker(id)),
            MapLabel::CameraChanged(_) => {}
        });

        let label_output = Arc::clone(&output);
        scope.forward_labels(store.labels(), move |label| match label {
            GeoMarkerLabel::AddMarker => label_output(GeoMarkerOutput::AddMarker),
        });

        // Location updates follow the permission.
        let map_sink = map.intent_sink();
        scope.observe(
            deps.permissions.granted(Permission::Location),
            move |granted: bool| {
                if granted {
                    map_sink.accept(MapIntent::StartLocationUpdates);
                } else {
                    map_sink.accept(MapIntent::StopLocationUpdates);
                }
            },
        );

        Self {
            store,
            map,
            sheet,
            scope,
        }
    }

    pub fn accept(&self, intent: GeoMarkerIntent) {
        self.store.accept(intent);
    }

    pub fn state(&self) -> GeoMarkerState {
        self.store.state()
    }

    pub fn model(&self) -> watch::Receiver<GeoMarkerState> {
        self.store.states()
    }

    pub fn map(&self) -> &MapComponent {
        &self.map
    }

    pub fn sheet(&self) -> &SheetComponent {
        &self.sheet
    }

    /// Let the sheet handle back first. Returns whether anything changed.
    pub fn back(&self) -> bool {
        self.sheet.back()
    }

    pub fn dispose(&self) {
        self.scope.cancel();
        self.sheet.dispose();
        self.map.dispose();
        self.store.dispose();
    }
}

impl Drop for GeoMarkerComponent {
    fn drop(&mut self) {
        self.dispose();
    }
}
