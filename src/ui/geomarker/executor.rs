use std::sync::Arc;

use crate::data::{observe_markers, MarkerRepository, RetryPolicy};
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{GeoMarkerIntent, GeoMarkerLabel};
use super::reducer::GeoMarkerMessage;
use super::state::GeoMarkerState;

#[derive(Debug, Clone)]
pub enum GeoMarkerAction {
    ObserveMarkers,
}

pub struct GeoMarkerExecutor {
    repository: Arc<dyn MarkerRepository>,
    retry: RetryPolicy,
}

impl GeoMarkerExecutor {
    pub fn new(repository: Arc<dyn MarkerRepository>, retry: RetryPolicy) -> Self {
        Self { repository, retry }
    }
}

impl Executor for GeoMarkerExecutor {
    type State = GeoMarkerState;
    type Intent = GeoMarkerIntent;
    type Action = GeoMarkerAction;
    type Message = GeoMarkerMessage;
    type Label = GeoMarkerLabel;

    fn execute_intent(&mut self, intent: GeoMarkerIntent, scope: &mut ExecutorScope<'_, Self>) {
        match intent {
            GeoMarkerIntent::SelectMarker(id) => {
                tracing::debug!(marker_id = id, "marker selected");
                scope.dispatch(GeoMarkerMessage::SelectionChanged(Some(id)));
            }
            GeoMarkerIntent::ClearSelection => {
                scope.dispatch(GeoMarkerMessage::SelectionChanged(None))
            }
            GeoMarkerIntent::AddMarkerClicked => scope.publish(GeoMarkerLabel::AddMarker),
        }
    }

    fn execute_action(&mut self, action: GeoMarkerAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            GeoMarkerAction::ObserveMarkers => {
                let repository = Arc::clone(&self.repository);
                let retry = self.retry;
                let handle = scope.handle();
                scope.launch(async move {
                    observe_markers(repository, retry, move |markers| {
                        handle.dispatch(GeoMarkerMessage::MarkersChanged(markers))
                    })
                    .await;
                });
            }
        }
    }
}
