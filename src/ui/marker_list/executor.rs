use std::sync::Arc;

use crate::data::{observe_markers, MarkerRepository, RetryPolicy};
use crate::domain::{sort_nearest_first, GeoMarker, LatLng, LocationStatus, MarkerId, MarkersState};
use crate::location::LocationTracker;
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{MarkerListIntent, MarkerListLabel};
use super::reducer::MarkerListMessage;
use super::state::MarkerListState;

#[derive(Debug, Clone)]
pub enum MarkerListAction {
    Observe,
    MarkersChanged(MarkersState),
    LocationChanged(LocationStatus),
}

pub struct MarkerListExecutor {
    repository: Arc<dyn MarkerRepository>,
    tracker: Arc<LocationTracker>,
    retry: RetryPolicy,
    /// Latest list as the repository published it.
    source: Vec<GeoMarker>,
    origin: Option<LatLng>,
}

impl MarkerListExecutor {
    pub fn new(
        repository: Arc<dyn MarkerRepository>,
        tracker: Arc<LocationTracker>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            repository,
            tracker,
            retry,
            source: Vec::new(),
            origin: None,
        }
    }

    fn arranged(&self) -> Vec<GeoMarker> {
        match self.origin {
            Some(origin) => sort_nearest_first(&self.source, origin),
            None => self.source.clone(),
        }
    }
}

/// Identity used to drop re-sorts that leave the list looking the same.
fn order_key(markers: &[GeoMarker]) -> (usize, Option<MarkerId>) {
    (markers.len(), markers.first().map(|marker| marker.id))
}

impl Executor for MarkerListExecutor {
    type State = MarkerListState;
    type Intent = MarkerListIntent;
    type Action = MarkerListAction;
    type Message = MarkerListMessage;
    type Label = MarkerListLabel;

    fn execute_intent(&mut self, intent: MarkerListIntent, scope: &mut ExecutorScope<'_, Self>) {
        match intent {
            MarkerListIntent::ItemClicked(id) => scope.publish(MarkerListLabel::Selected(id)),
        }
    }

    fn execute_action(&mut self, action: MarkerListAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            MarkerListAction::Observe => {
                let repository = Arc::clone(&self.repository);
                let retry = self.retry;
                let handle = scope.handle();
                scope.launch(async move {
                    observe_markers(repository, retry, move |markers| {
                        handle.forward(MarkerListAction::MarkersChanged(markers))
                    })
                    .await;
                });

                let mut status = self.tracker.status();
                let handle = scope.handle();
                scope.launch(async move {
                    loop {
                        let next = status.borrow_and_update().clone();
                        handle.forward(MarkerListAction::LocationChanged(next));
                        if status.changed().await.is_err() {
                            break;
                        }
                    }
                });
            }
            MarkerListAction::MarkersChanged(MarkersState::Loading) => {
                if !matches!(scope.state().markers, MarkersState::Loaded(_)) {
                    scope.dispatch(MarkerListMessage::Loading);
                }
            }
            MarkerListAction::MarkersChanged(MarkersState::Error(error)) => {
                scope.dispatch(MarkerListMessage::Failed(error));
            }
            MarkerListAction::MarkersChanged(MarkersState::Loaded(markers)) => {
                // Content changes always go through; identical lists are
                // absorbed by the store's equality check.
                self.source = markers;
                scope.dispatch(MarkerListMessage::Arranged {
                    markers: self.arranged(),
                    origin: self.origin,
                });
            }
            MarkerListAction::LocationChanged(status) => {
                let Some(point) = status.point() else {
                    return;
                };
                self.origin = Some(point);
                let state = scope.state();
                if !matches!(state.markers, MarkersState::Loaded(_)) {
                    return;
                }
                let markers = self.arranged();
                if order_key(&markers) != order_key(state.markers.markers()) {
                    scope.dispatch(MarkerListMessage::Arranged {
                        markers,
                        origin: self.origin,
                    });
                } else {
                    scope.dispatch(MarkerListMessage::OriginMoved(point));
                }
            }
        }
    }
}
