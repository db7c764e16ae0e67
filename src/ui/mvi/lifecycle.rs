//! Store lifecycle tracking.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecyclePhase {
    Created = 0,
    Bootstrapping = 1,
    Ready = 2,
    Disposed = 3,
}

impl LifecyclePhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecyclePhase::Created,
            1 => LifecyclePhase::Bootstrapping,
            2 => LifecyclePhase::Ready,
            _ => LifecyclePhase::Disposed,
        }
    }
}

/// Shared lifecycle flag of one store.
///
/// `Disposed` is terminal: once reached, `advance` has no effect.
#[derive(Clone)]
pub struct Lifecycle {
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(LifecyclePhase::Created as u8)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        LifecyclePhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_disposed(&self) -> bool {
        self.phase() == LifecyclePhase::Disposed
    }

    /// Move to `phase` unless already disposed.
    pub fn advance(&self, phase: LifecyclePhase) {
        let _ = self
            .phase
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                if current == LifecyclePhase::Disposed as u8 {
                    None
                } else {
                    Some(phase as u8)
                }
            });
    }

    /// Mark as disposed. Returns true on the first call only.
    pub fn dispose(&self) -> bool {
        let previous = self
            .phase
            .swap(LifecyclePhase::Disposed as u8, Ordering::SeqCst);
        if previous == LifecyclePhase::Disposed as u8 {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    /// Resolves once the lifecycle reaches `Disposed`.
    pub async fn disposed(&self) {
        // Register with Notify before checking the flag, otherwise a dispose()
        // landing between the check and the await would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_disposed() {
            return;
        }
        notified.await;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
