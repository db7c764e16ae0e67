//! Bottom sheet: marker list with a details page pushed on top.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::{GeoMarker, MarkerId};
use crate::ui::dependencies::Dependencies;
use crate::ui::marker_details::{
    MarkerDetailsComponent, MarkerDetailsIntent, MarkerDetailsLabel, MarkerDetailsState,
};
use crate::ui::marker_list::{MarkerListComponent, MarkerListIntent, MarkerListLabel, MarkerListState};
use crate::ui::mvi::{IntentSink, Output, TaskScope};
use crate::ui::navigation::ChildStack;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SheetConfig {
    List,
    Details { marker_id: MarkerId },
}

pub enum SheetChild {
    List(MarkerListComponent),
    Details(MarkerDetailsComponent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutput {
    /// A list item was picked; the owner decides whether to show it.
    MarkerSelected(MarkerId),
    EditMarker(GeoMarker),
    /// The details page was closed from inside the sheet.
    DetailsClosed,
}

type Stack = Mutex<ChildStack<SheetConfig, SheetChild>>;

pub struct SheetComponent {
    stack: Arc<Stack>,
    output: Output<SheetOutput>,
    scope: Arc<TaskScope>,
}

impl SheetComponent {
    pub fn new(
        deps: Arc<Dependencies>,
        output: impl Fn(SheetOutput) + Send + Sync + 'static,
    ) -> Self {
        let output: Output<SheetOutput> = Arc::new(output);
        let scope = Arc::new(TaskScope::new());

        let factory_output = Arc::clone(&output);
        let factory_scope = Arc::downgrade(&scope);
        let stack = Arc::new_cyclic(|stack: &Weak<Stack>| {
            let stack = stack.clone();
            Mutex::new(ChildStack::new(SheetConfig::List, move |config| {
                create_child(config, &deps, &factory_scope, &stack, &factory_output)
            }))
        });

        Self {
            stack,
            output,
            scope,
        }
    }

    /// Show `marker_id`, replacing a details page that is already open.
    pub fn show_details(&self, marker_id: MarkerId) {
        let mut stack = self.stack.lock();
        let config = SheetConfig::Details { marker_id };
        let current = stack.active_config().clone();
        if current == config {
            return;
        }
        match current {
            SheetConfig::Details { .. } => stack.replace_top(config),
            SheetConfig::List => stack.push(config),
        }
    }

    /// Close the details page without reporting it. Returns whether one was open.
    pub fn close_details(&self) -> bool {
        close_details(&self.stack)
    }

    /// Pop one level; `false` when only the list is left.
    pub fn back(&self) -> bool {
        let popped = self.stack.lock().pop();
        if popped {
            (self.output)(SheetOutput::DetailsClosed);
        }
        popped
    }

    pub fn active_config(&self) -> SheetConfig {
        self.stack.lock().active_config().clone()
    }

    pub fn configs(&self) -> Vec<SheetConfig> {
        self.stack.lock().configs()
    }

    pub fn watch_configs(&self) -> watch::Receiver<Vec<SheetConfig>> {
        self.stack.lock().watch_configs()
    }

    pub fn list_state(&self) -> Option<MarkerListState> {
        self.stack.lock().children().find_map(|child| match child {
            SheetChild::List(list) => Some(list.state()),
            SheetChild::Details(_) => None,
        })
    }

    pub fn list(&self) -> Option<IntentSink<MarkerListIntent>> {
        self.stack.lock().children().find_map(|child| match child {
            SheetChild::List(list) => Some(list.intent_sink()),
            SheetChild::Details(_) => None,
        })
    }

    pub fn details_state(&self) -> Option<MarkerDetailsState> {
        match self.stack.lock().active() {
            SheetChild::Details(details) => Some(details.state()),
            SheetChild::List(_) => None,
        }
    }

    pub fn details(&self) -> Option<IntentSink<MarkerDetailsIntent>> {
        match self.stack.lock().active() {
            SheetChild::Details(details) => Some(details.intent_sink()),
            SheetChild::List(_) => None,
        }
    }

    pub fn dispose(&self) {
        self.scope.cancel();
    }
}

fn close_details(stack: &Stack) -> bool {
    let mut stack = stack.lock();
    let showing_details = matches!(stack.active_config(), SheetConfig::Details { .. });
    showing_details && stack.pop()
}

fn create_child(
    config: &SheetConfig,
    deps: &Dependencies,
    scope: &Weak<TaskScope>,
    stack: &Weak<Stack>,
    output: &Output<SheetOutput>,
) -> SheetChild {
    let settings = deps.settings;
    let scope = scope.upgrade();
    match config {
        SheetConfig::List => {
            let list = MarkerListComponent::new(settings.store_options("marker-list"), deps);
            if let Some(scope) = scope {
                let output = Arc::clone(output);
                scope.forward_labels(list.labels(), move |label| match label {
                    MarkerListLabel::Selected(id) => output(SheetOutput::MarkerSelected(id)),
                });
            }
            SheetChild::List(list)
        }
        SheetConfig::Details { marker_id } => {
            let details =
                MarkerDetailsComponent::new(settings.store_options("marker-details"), *marker_id, deps);
            if let Some(scope) = scope {
                let output = Arc::clone(output);
                let stack = stack.clone();
                scope.forward_labels(details.labels(), move |label| match label {
                    MarkerDetailsLabel::Edit(marker) => output(SheetOutput::EditMarker(marker)),
                    MarkerDetailsLabel::Back => {
                        let closed = stack.upgrade().is_some_and(|stack| close_details(&stack));
                        if closed {
                            output(SheetOutput::DetailsClosed);
                        }
                    }
                });
            }
            SheetChild::Details(details)
        }
    }
}
