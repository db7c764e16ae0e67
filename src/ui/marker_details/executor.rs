use std::sync::Arc;

use crate::data::MarkerRepository;
use crate::domain::MarkerId;
use crate::ui::mvi::{Executor, ExecutorScope};

use super::intent::{MarkerDetailsIntent, MarkerDetailsLabel};
use super::reducer::MarkerDetailsMessage;
use super::state::MarkerDetailsState;

#[derive(Debug, Clone)]
pub enum MarkerDetailsAction {
    Observe(MarkerId),
}

pub struct MarkerDetailsExecutor {
    repository: Arc<dyn MarkerRepository>,
}

impl MarkerDetailsExecutor {
    pub fn new(repository: Arc<dyn MarkerRepository>) -> Self {
        Self { repository }
    }
}

impl Executor for MarkerDetailsExecutor {
    type State = MarkerDetailsState;
    type Intent = MarkerDetailsIntent;
    type Action = MarkerDetailsAction;
    type Message = MarkerDetailsMessage;
    type Label = MarkerDetailsLabel;

    fn execute_intent(&mut self, intent: MarkerDetailsIntent, scope: &mut ExecutorScope<'_, Self>) {
        let state = scope.state();
        match intent {
            MarkerDetailsIntent::ImageSelected(index) => {
                scope.dispatch(MarkerDetailsMessage::ImageSelected(index))
            }
            MarkerDetailsIntent::NextImage => scope.dispatch(MarkerDetailsMessage::ImageSelected(
                state.selected_image.saturating_add(1),
            )),
            MarkerDetailsIntent::PreviousImage => scope.dispatch(
                MarkerDetailsMessage::ImageSelected(state.selected_image.saturating_sub(1)),
            ),
            MarkerDetailsIntent::EditClicked => match state.marker() {
                Some(marker) => scope.publish(MarkerDetailsLabel::Edit(marker.clone())),
                None => tracing::debug!(marker_id = state.marker_id, "nothing to edit"),
            },
            MarkerDetailsIntent::BackClicked => scope.publish(MarkerDetailsLabel::Back),
        }
    }

    fn execute_action(&mut self, action: MarkerDetailsAction, scope: &mut ExecutorScope<'_, Self>) {
        match action {
            MarkerDetailsAction::Observe(id) => {
                let repository = Arc::clone(&self.repository);
                let handle = scope.handle();
                scope.launch(async move {
                    let mut marker = match repository.marker_by_id(id).await {
                        Ok(marker) => marker,
                        Err(err) => {
                            tracing::warn!(marker_id = id, "failed to read marker: {}", err);
                            handle.dispatch(MarkerDetailsMessage::LoadFailed(err.to_string()));
                            return;
                        }
                    };
                    loop {
                        let next = marker.borrow_and_update().clone();
                        handle.dispatch(MarkerDetailsMessage::MarkerUpdated(next));
                        if marker.changed().await.is_err() {
                            break;
                        }
                    }
                });
            }
        }
    }
}
