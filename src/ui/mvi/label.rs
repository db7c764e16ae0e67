//! One-shot label delivery with replay for late subscribers.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Fan-out channel for store labels.
///
/// Every live subscriber receives every label published after it attached.
/// Labels published while nobody is attached are kept (up to `capacity`,
/// oldest evicted first) and handed to the next subscriber, so a component
/// that re-attaches after a reconfiguration does not lose a navigation event.
pub struct LabelBus<L> {
    inner: Arc<Mutex<LabelBusInner<L>>>,
}

struct LabelBusInner<L> {
    subscribers: Vec<mpsc::UnboundedSender<L>>,
    pending: VecDeque<L>,
    capacity: usize,
    closed: bool,
}

impl<L> Clone for LabelBus<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Clone + Send + 'static> LabelBus<L> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LabelBusInner {
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                capacity,
                closed: false,
            })),
        }
    }

    pub fn publish(&self, label: L) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }

        inner.subscribers.retain(|tx| !tx.is_closed());
        if inner.subscribers.is_empty() {
            if inner.capacity == 0 {
                tracing::trace!("label dropped: no subscriber and replay disabled");
                return;
            }
            if inner.pending.len() == inner.capacity {
                inner.pending.pop_front();
                tracing::debug!("label replay buffer full, oldest label evicted");
            }
            inner.pending.push_back(label);
            return;
        }

        for tx in &inner.subscribers {
            let _ = tx.send(label.clone());
        }
    }

    /// Attach a subscriber. Buffered labels are delivered to it first.
    ///
    /// Subscribing to a closed bus yields a receiver that is already at
    /// end of stream.
    pub fn subscribe(&self) -> LabelReceiver<L> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        if !inner.closed {
            for label in inner.pending.drain(..) {
                let _ = tx.send(label);
            }
            inner.subscribers.push(tx);
        }
        LabelReceiver { rx }
    }

    /// Close the bus: current receivers see end of stream after draining.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.subscribers.clear();
        inner.pending.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

/// Receiving half returned by [`LabelBus::subscribe`].
pub struct LabelReceiver<L> {
    rx: mpsc::UnboundedReceiver<L>,
}

impl<L> LabelReceiver<L> {
    /// Next label, or `None` once the bus is closed and drained.
    pub async fn recv(&mut self) -> Option<L> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<L> {
        self.rx.try_recv().ok()
    }
}
