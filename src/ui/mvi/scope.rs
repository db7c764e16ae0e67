//! Task scope for component glue code.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::label::LabelReceiver;

/// Callback through which a component reports outputs to its parent.
pub type Output<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Group of tasks cancelled together.
///
/// Components keep their wiring (label forwarding, state observation) in a
/// scope so that disposing the component leaves no orphaned subscription.
/// Cancelling is idempotent; spawning into a cancelled scope is a no-op.
#[derive(Default)]
pub struct TaskScope {
    tasks: Mutex<Vec<JoinHandle<()>>>,
    cancelled: AtomicBool,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            return;
        }
        let handle = tokio::spawn(future);
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Call `on_label` for every label until the stream closes.
    pub fn forward_labels<L, F>(&self, mut labels: LabelReceiver<L>, mut on_label: F)
    where
        L: Send + 'static,
        F: FnMut(L) + Send + 'static,
    {
        self.spawn(async move {
            while let Some(label) = labels.recv().await {
                on_label(label);
            }
        });
    }

    /// Call `on_value` with the current value, then with every change.
    pub fn observe<T, F>(&self, mut values: watch::Receiver<T>, mut on_value: F)
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut(T) + Send + 'static,
    {
        self.spawn(async move {
            loop {
                let value = values.borrow_and_update().clone();
                on_value(value);
                if values.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn observe_sees_initial_value_and_changes() {
        let scope = TaskScope::new();
        let (tx, rx) = watch::channel(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        scope.observe(rx, move |value| sink.lock().push(value));

        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(2).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[tokio::test]
    async fn cancel_stops_observers() {
        let scope = TaskScope::new();
        let (tx, rx) = watch::channel(0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        scope.observe(rx, move |value| sink.lock().push(value));
        tokio::time::sleep(Duration::from_millis(10)).await;

        scope.cancel();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let _ = tx.send(5);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(*seen.lock(), vec![0]);
        assert!(scope.is_cancelled());
    }
}
