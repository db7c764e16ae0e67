//! Root navigation between the main screen and the editor.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use crate::domain::GeoMarker;
use crate::ui::dependencies::Dependencies;
use crate::ui::editor::{EditorComponent, EditorIntent, EditorOutput};
use crate::ui::geomarker::{GeoMarkerComponent, GeoMarkerOutput};
use crate::ui::mvi::TaskScope;
use crate::ui::navigation::{ChildStack, NavigationError};

use super::config::{EditorTarget, RootConfig};

pub enum RootChild {
    GeoMarkers(GeoMarkerComponent),
    Editor(EditorComponent),
}

/// Requests from children, applied one at a time by the router task.
#[derive(Debug)]
enum RootEvent {
    AddMarker,
    EditMarker(GeoMarker),
    EditorClosed,
}

type Stack = Arc<Mutex<ChildStack<RootConfig, RootChild>>>;

pub struct RootComponent {
    stack: Stack,
    scope: TaskScope,
}

impl RootComponent {
    /// Start on the main screen. Must be called from within a tokio runtime.
    pub fn new(deps: Arc<Dependencies>) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let stack = ChildStack::new(RootConfig::GeoMarkers, child_factory(deps, events));
        Self::start(stack, rx)
    }

    /// Rebuild the stack saved by [`RootComponent::save_state`].
    pub fn restore(deps: Arc<Dependencies>, saved: &str) -> Result<Self, NavigationError> {
        let (events, rx) = mpsc::unbounded_channel();
        let stack = ChildStack::restore_json(saved, child_factory(deps, events))?;
        tracing::info!(depth = stack.len(), "navigation restored");
        Ok(Self::start(stack, rx))
    }

    fn start(
        stack: ChildStack<RootConfig, RootChild>,
        mut events: mpsc::UnboundedReceiver<RootEvent>,
    ) -> Self {
        let stack: Stack = Arc::new(Mutex::new(stack));
        let scope = TaskScope::new();

        let router_stack = Arc::clone(&stack);
        scope.spawn(async move {
            while let Some(event) = events.recv().await {
                route(&router_stack, event);
            }
        });

        Self { stack, scope }
    }

    pub fn save_state(&self) -> Result<String, NavigationError> {
        self.stack.lock().save_json()
    }

    /// Let the active child handle back, then pop.
    ///
    /// Returns `false` when nothing was left to go back from.
    pub fn back(&self) -> bool {
        let mut stack = self.stack.lock();
        let handled = match stack.active() {
            RootChild::GeoMarkers(main) => main.back(),
            RootChild::Editor(editor) => {
                if editor.state().show_image_picker {
                    editor.accept(EditorIntent::ImagePickerDismissed);
                    true
                } else {
                    false
                }
            }
        };
        handled || stack.pop()
    }

    pub fn active_config(&self) -> RootConfig {
        self.stack.lock().active_config().clone()
    }

    pub fn configs(&self) -> Vec<RootConfig> {
        self.stack.lock().configs()
    }

    pub fn watch_configs(&self) -> watch::Receiver<Vec<RootConfig>> {
        self.stack.lock().watch_configs()
    }

    /// Run `f` against the active child.
    pub fn with_active<R>(&self, f: impl FnOnce(&RootChild) -> R) -> R {
        f(self.stack.lock().active())
    }

    pub fn dispose(&self) {
        self.scope.cancel();
    }
}

fn child_factory(
    deps: Arc<Dependencies>,
    events: mpsc::UnboundedSender<RootEvent>,
) -> impl Fn(&RootConfig) -> RootChild + Send + Sync + 'static {
    move |config| match config {
        RootConfig::GeoMarkers => {
            let events = events.clone();
            RootChild::GeoMarkers(GeoMarkerComponent::new(Arc::clone(&deps), move |output| {
                let event = match output {
                    GeoMarkerOutput::AddMarker => RootEvent::AddMarker,
                    GeoMarkerOutput::EditMarker(marker) => RootEvent::EditMarker(marker),
                };
                send(&events, event);
            }))
        }
        RootConfig::Editor(target) => {
            let events = events.clone();
            let marker = target.marker().cloned();
            RootChild::Editor(EditorComponent::new(marker, &deps, move |output| {
                match output {
                    EditorOutput::Saved(id) => tracing::debug!(marker_id = id, "editor saved"),
                    EditorOutput::Deleted(id) => tracing::debug!(marker_id = id, "editor deleted"),
                    EditorOutput::Back => {}
                }
                send(&events, RootEvent::EditorClosed);
            }))
        }
    }
}

fn send(events: &mpsc::UnboundedSender<RootEvent>, event: RootEvent) {
    if events.send(event).is_err() {
        tracing::trace!("root router gone, navigation event dropped");
    }
}

fn route(stack: &Mutex<ChildStack<RootConfig, RootChild>>, event: RootEvent) {
    let mut stack = stack.lock();
    let on_main = matches!(stack.active_config(), RootConfig::GeoMarkers);
    match event {
        RootEvent::AddMarker if on_main => stack.push(RootConfig::Editor(EditorTarget::Add)),
        RootEvent::EditMarker(marker) if on_main => {
            stack.push(RootConfig::Editor(EditorTarget::Edit(marker)))
        }
        RootEvent::EditorClosed if !on_main => {
            stack.pop();
        }
        event => tracing::debug!(?event, "navigation event ignored in current screen"),
    }
}
