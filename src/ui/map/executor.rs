//! Side effects of the map: location subscription and last-position I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::data::LastPositionRepository;
use crate::domain::{CameraPosition, LatLng, LocationStatus, DEFAULT_ZOOM};
use crate::location::LocationTracker;
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{MapIntent, MapLabel};
use super::reducer::MapMessage;
use super::state::MapState;

#[derive(Debug, Clone)]
pub enum MapAction {
    /// Bootstrap: position the camera where the user last left it.
    RestoreLastPosition,
    LastPositionLoaded(LatLng),
    LocationUpdated(LocationStatus),
}

pub struct MapExecutor {
    tracker: Arc<LocationTracker>,
    last_position: Option<Arc<dyn LastPositionRepository>>,
    location_interval: Duration,
    subscribed: bool,
}

impl MapExecutor {
    pub fn new(
        tracker: Arc<LocationTracker>,
        last_position: Option<Arc<dyn LastPositionRepository>>,
        location_interval: Duration,
    ) -> Self {
        Self {
            tracker,
            last_position,
            location_interval,
            subscribed: false,
        }
    }

    /// Apply `camera` unless it is already current, then report it.
    fn apply_camera(&self, camera: CameraPosition, scope: &mut ExecutorScope<'_, Self>) {
        if scope.state().camera == Some(camera) {
            return;
        }
        scope.dispatch(MapMessage::CameraMoved(camera));
        scope.publish(MapLabel::CameraChanged(camera));

        if let Some(repository) = &self.last_position {
            let repository = Arc::clone(repository);
            scope.launch(async move {
                if let Err(err) = repository.update_last_position(camera.target).await {
                    tracing::warn!("failed to persist last map position: {}", err);
                }
            });
        }
    }

    /// Forward tracker statuses into the store, once per store.
    fn subscribe_location(&mut self, scope: &mut ExecutorScope<'_, Self>) {
        if self.subscribed {
            return;
        }
        self.subscribed = true;

        let mut status = self.tracker.status();
        let handle = scope.handle();
        scope.launch(async move {
            loop {
                let next = status.borrow_and_update().clone();
                handle.forward(MapAction::LocationUpdated(next));
                if status.changed().await.is_err() {
                    break;
                }
            }
        });
    }
}

impl Executor for MapExecutor {
    type State = MapState;
    type Intent = MapIntent;
    type Action = MapAction;
    type Message = MapMessage;
    type Label = MapLabel;

    fn execute_intent(&mut self, intent: MapIntent, scope: &mut ExecutorScope<'_, Self>) {
        match intent {
            MapIntent::StartLocationUpdates => {
                self.subscribe_location(scope);
                self.tracker.start_updates(self.location_interval);
            }
            MapIntent::StopLocationUpdates => self.tracker.stop_updates(),
            MapIntent::MoveToMyLocation => match scope.state().location.point() {
                Some(point) => self.apply_camera(CameraPosition::centered(point, DEFAULT_ZOOM), scope),
                None => tracing::debug!("no location fix yet, ignoring move to my location"),
            },
            MapIntent::ChangeZoom(delta) if !delta.is_finite() => {
                tracing::debug!(delta, "ignoring non-finite zoom delta");
            }
            MapIntent::ChangeZoom(delta) => {
                if let Some(camera) = scope.state().camera {
                    self.apply_camera(camera.zoomed_by(delta), scope);
                }
            }
            MapIntent::UpdateCameraPosition(camera) => {
                let significant = scope
                    .state()
                    .camera
                    .map_or(true, |current| current.differs_significantly(&camera));
                if significant {
                    self.apply_camera(camera, scope);
                }
            }
            MapIntent::MarkerClicked(marker) => {
                let id = marker.id;
                scope.dispatch(MapMessage::MarkerSelected(Some(marker)));
                scope.publish(MapLabel::MarkerClicked(id));
            }
            MapIntent::SetMarkers(markers) => scope.dispatch(MapMessage::MarkersChanged(markers)),
            MapIntent::CenterOn(point) => {
                let camera = match scope.state().camera {
                    Some(current) => CameraPosition {
                        target: point,
                        ..current
                    },
                    None => CameraPosition::centered(point, DEFAULT_ZOOM),
                };
                self.execute_intent(MapIntent::UpdateCameraPosition(camera), scope);
            }
            MapIntent::HighlightMarker(id) => {
                let selected = id.and_then(|id| {
                    scope.state().markers.into_iter().find(|marker| marker.id == id)
                });
                scope.dispatch(MapMessage::MarkerSelected(selected));
            }
        }
    }

    fn execute_action(&mut self, action: MapAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            MapAction::RestoreLastPosition => {
                let Some(repository) = self.last_position.clone() else {
                    return;
                };
                let handle = scope.handle();
                scope.launch(async move {
                    match repository.last_position().await {
                        Ok(Some(point)) => handle.forward(MapAction::LastPositionLoaded(point)),
                        Ok(None) => tracing::debug!("no last map position stored"),
                        Err(err) => tracing::warn!("failed to read last map position: {}", err),
                    }
                });
            }
            MapAction::LastPositionLoaded(point) => {
                // Anything that already placed the camera wins.
                if scope.state().camera.is_none() {
                    scope.dispatch(MapMessage::CameraMoved(CameraPosition::centered(
                        point,
                        DEFAULT_ZOOM,
                    )));
                }
            }
            MapAction::LocationUpdated(status) => {
                let fix = status.point();
                scope.dispatch(MapMessage::LocationChanged(status));
                if let Some(point) = fix {
                    if scope.state().is_first_location {
                        scope.dispatch(MapMessage::FirstLocationConsumed);
                        self.apply_camera(CameraPosition::centered(point, DEFAULT_ZOOM), scope);
                    }
                }
            }
        }
    }
}
