//! Store: the single mutation point of one component's state.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;

use super::executor::{apply_message, Executor, ExecutorScope, Inbound, StoreHandle};
use super::intent::Intent;
use super::label::{LabelBus, LabelReceiver};
use super::lifecycle::{Lifecycle, LifecyclePhase};
use super::reducer::Reducer;
use super::state::UiState;

/// Labels kept for a late subscriber when none is attached.
pub const DEFAULT_LABEL_REPLAY_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Name used in log output.
    pub name: &'static str,
    pub label_replay_capacity: usize,
}

impl StoreOptions {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            label_replay_capacity: DEFAULT_LABEL_REPLAY_CAPACITY,
        }
    }

    pub fn with_label_replay(mut self, capacity: usize) -> Self {
        self.label_replay_capacity = capacity;
        self
    }
}

enum Envelope<I> {
    Intent(I),
    Settle(oneshot::Sender<()>),
}

/// Cloneable intent entry point, for glue code that must not own the store.
pub struct IntentSink<I> {
    tx: mpsc::UnboundedSender<Envelope<I>>,
}

impl<I> Clone for IntentSink<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<I: Intent> IntentSink<I> {
    pub fn accept(&self, intent: I) {
        if self.tx.send(Envelope::Intent(intent)).is_err() {
            tracing::trace!("intent dropped: store disposed");
        }
    }
}

/// A running store.
///
/// Created with [`Store::create`]; the executor and reducer run on a
/// dedicated tokio task which is the only place state is written.
/// Dropping the store disposes it: in-flight executor work is aborted
/// and the label stream is closed.
pub struct Store<I, S, L> {
    name: &'static str,
    intents: mpsc::UnboundedSender<Envelope<I>>,
    state: watch::Receiver<S>,
    labels: LabelBus<L>,
    lifecycle: Lifecycle,
}

impl<I, S, L> Store<I, S, L>
where
    I: Intent,
    S: UiState,
    L: Clone + Send + 'static,
{
    /// Start a store.
    ///
    /// `bootstrap` actions run once, before any intent is processed.
    /// Must be called from within a tokio runtime.
    pub fn create<E, R>(
        options: StoreOptions,
        initial: S,
        bootstrap: Vec<E::Action>,
        executor: E,
        _reducer: R,
    ) -> Self
    where
        E: Executor<State = S, Intent = I, Label = L>,
        R: Reducer<State = S, Message = E::Message>,
    {
        let (state_tx, state_rx) = watch::channel(initial);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let labels = LabelBus::new(options.label_replay_capacity);
        let lifecycle = Lifecycle::new();

        let run = StoreLoop {
            name: options.name,
            executor,
            reduce: R::reduce,
            state: state_tx,
            labels: labels.clone(),
            lifecycle: lifecycle.clone(),
            handle: StoreHandle::new(inbox_tx, state_rx.clone()),
        };
        tokio::spawn(run.run(bootstrap, intent_rx, inbox_rx));
        tracing::debug!(store = options.name, "store created");

        Self {
            name: options.name,
            intents: intent_tx,
            state: state_rx,
            labels,
            lifecycle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn accept(&self, intent: I) {
        if self.intents.send(Envelope::Intent(intent)).is_err() {
            tracing::trace!(store = self.name, "intent dropped: store disposed");
        }
    }

    pub fn intent_sink(&self) -> IntentSink<I> {
        IntentSink {
            tx: self.intents.clone(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Observable model: last value cached, notified on every change.
    pub fn states(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    pub fn labels(&self) -> LabelReceiver<L> {
        self.labels.subscribe()
    }

    pub fn lifecycle(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    /// Resolves once every intent accepted so far has reached the executor.
    ///
    /// Work the executor launched in the background may still be running.
    pub async fn settled(&self) {
        let (tx, rx) = oneshot::channel();
        if self.intents.send(Envelope::Settle(tx)).is_err() {
            return;
        }
        let _ = rx.await;
    }

    pub fn dispose(&self) {
        if self.lifecycle.dispose() {
            tracing::debug!(store = self.name, "store disposed");
        }
    }
}

impl<I, S, L> Drop for Store<I, S, L> {
    fn drop(&mut self) {
        if self.lifecycle.dispose() {
            tracing::debug!(store = self.name, "store dropped");
        }
    }
}

struct StoreLoop<E: Executor> {
    name: &'static str,
    executor: E,
    reduce: fn(E::State, E::Message) -> E::State,
    state: watch::Sender<E::State>,
    labels: LabelBus<E::Label>,
    lifecycle: Lifecycle,
    handle: StoreHandle<E>,
}

impl<E: Executor> StoreLoop<E> {
    async fn run(
        mut self,
        bootstrap: Vec<E::Action>,
        mut intents: mpsc::UnboundedReceiver<Envelope<E::Intent>>,
        mut inbox: mpsc::UnboundedReceiver<Inbound<E>>,
    ) {
        let mut tasks = JoinSet::new();

        self.lifecycle.advance(LifecyclePhase::Bootstrapping);
        for action in bootstrap {
            let mut scope = ExecutorScope::new(
                &self.state,
                self.reduce,
                &self.labels,
                &mut tasks,
                &self.handle,
            );
            self.executor.execute_action(action, &mut scope);
        }
        self.lifecycle.advance(LifecyclePhase::Ready);

        loop {
            tokio::select! {
                biased;
                _ = self.lifecycle.disposed() => break,
                Some(inbound) = inbox.recv() => match inbound {
                    Inbound::Action(action) => {
                        let mut scope = ExecutorScope::new(
                            &self.state,
                            self.reduce,
                            &self.labels,
                            &mut tasks,
                            &self.handle,
                        );
                        self.executor.execute_action(action, &mut scope);
                    }
                    Inbound::Message(message) => {
                        apply_message(&self.state, self.reduce, message);
                    }
                    Inbound::Label(label) => self.labels.publish(label),
                },
                envelope = intents.recv() => match envelope {
                    Some(Envelope::Intent(intent)) => {
                        let mut scope = ExecutorScope::new(
                            &self.state,
                            self.reduce,
                            &self.labels,
                            &mut tasks,
                            &self.handle,
                        );
                        self.executor.execute_intent(intent, &mut scope);
                    }
                    Some(Envelope::Settle(done)) => {
                        let _ = done.send(());
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(err) = joined {
                        if err.is_panic() {
                            tracing::error!(store = self.name, "executor task panicked: {}", err);
                        }
                    }
                }
            }
        }

        tasks.abort_all();
        self.labels.close();
        self.lifecycle.dispose();
        tracing::trace!(store = self.name, "store loop finished");
    }
}
