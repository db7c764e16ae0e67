//! Executor trait and the scope it runs in.

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use super::intent::Intent;
use super::label::LabelBus;
use super::state::UiState;

/// Side-effect half of a store.
///
/// The executor is called on the store's own task, one input at a time.
/// It never touches state directly: it dispatches messages through the
/// [`ExecutorScope`], which runs the reducer immediately so a following
/// `scope.state()` already observes the result. Asynchronous work is
/// started with [`ExecutorScope::launch`] and reports back through a
/// [`StoreHandle`]; those reports are applied on the store task in order.
pub trait Executor: Send + Sized + 'static {
    type State: UiState;
    type Intent: Intent;
    type Action: Send + 'static;
    type Message: Send + 'static;
    type Label: Clone + Send + 'static;

    fn execute_intent(&mut self, intent: Self::Intent, scope: &mut ExecutorScope<'_, Self>);

    /// Handle an internal action (bootstrap or background report).
    ///
    /// Default implementation ignores actions.
    fn execute_action(&mut self, action: Self::Action, scope: &mut ExecutorScope<'_, Self>) {
        let _ = (action, scope);
    }
}

/// Inputs that background work feeds back into the store task.
pub(crate) enum Inbound<E: Executor> {
    Action(E::Action),
    Message(E::Message),
    Label(E::Label),
}

/// Cloneable handle for work launched outside the store task.
pub struct StoreHandle<E: Executor> {
    inbox: mpsc::UnboundedSender<Inbound<E>>,
    state: watch::Receiver<E::State>,
}

impl<E: Executor> Clone for StoreHandle<E> {
    fn clone(&self) -> Self {
        Self {
            inbox: self.inbox.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: Executor> StoreHandle<E> {
    pub(crate) fn new(
        inbox: mpsc::UnboundedSender<Inbound<E>>,
        state: watch::Receiver<E::State>,
    ) -> Self {
        Self { inbox, state }
    }

    /// Latest state as seen by the store task.
    pub fn state(&self) -> E::State {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, message: E::Message) {
        self.send(Inbound::Message(message));
    }

    pub fn forward(&self, action: E::Action) {
        self.send(Inbound::Action(action));
    }

    pub fn publish(&self, label: E::Label) {
        self.send(Inbound::Label(label));
    }

    fn send(&self, inbound: Inbound<E>) {
        if self.inbox.send(inbound).is_err() {
            tracing::trace!("store already disposed, background result dropped");
        }
    }
}

/// Everything an executor may do while handling one input.
pub struct ExecutorScope<'a, E: Executor> {
    state: &'a watch::Sender<E::State>,
    reduce: fn(E::State, E::Message) -> E::State,
    labels: &'a LabelBus<E::Label>,
    tasks: &'a mut JoinSet<()>,
    handle: &'a StoreHandle<E>,
}

impl<'a, E: Executor> ExecutorScope<'a, E> {
    pub(crate) fn new(
        state: &'a watch::Sender<E::State>,
        reduce: fn(E::State, E::Message) -> E::State,
        labels: &'a LabelBus<E::Label>,
        tasks: &'a mut JoinSet<()>,
        handle: &'a StoreHandle<E>,
    ) -> Self {
        Self {
            state,
            reduce,
            labels,
            tasks,
            handle,
        }
    }

    pub fn state(&self) -> E::State {
        self.state.borrow().clone()
    }

    /// Reduce `message` into the state right away.
    pub fn dispatch(&mut self, message: E::Message) {
        apply_message(self.state, self.reduce, message);
    }

    pub fn publish(&mut self, label: E::Label) {
        self.labels.publish(label);
    }

    /// Queue an action behind the inputs already waiting for the store.
    pub fn forward(&mut self, action: E::Action) {
        self.handle.forward(action);
    }

    /// Run `future` in the store's task scope; it is aborted on disposal.
    pub fn launch<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(future);
    }

    pub fn handle(&self) -> StoreHandle<E> {
        self.handle.clone()
    }
}

/// Fold one message into the state cell, notifying observers only on change.
pub(crate) fn apply_message<S: UiState, M>(
    state: &watch::Sender<S>,
    reduce: fn(S, M) -> S,
    message: M,
) {
    state.send_if_modified(|current| {
        let next = reduce(current.clone(), message);
        if next == *current {
            false
        } else {
            *current = next;
            true
        }
    });
}
