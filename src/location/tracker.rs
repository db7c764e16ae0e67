use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::data::LocationProvider;
use crate::domain::LocationStatus;

/// Owns the location subscription lifecycle and caches its latest status.
///
/// Status moves `Initial → Loading` on start, then follows the provider
/// (`Available` per fix, `Error` when unavailable), and returns to
/// `Initial` on stop. Permission checks happen before `start_updates`.
pub struct LocationTracker {
    provider: Arc<dyn LocationProvider>,
    status: Arc<watch::Sender<LocationStatus>>,
    forwarder: Mutex<Option<JoinHandle<()>>>,
}

impl LocationTracker {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            status: Arc::new(watch::channel(LocationStatus::Initial).0),
            forwarder: Mutex::new(None),
        }
    }

    /// Begin receiving fixes. A second call while tracking is a no-op.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_updates(&self, min_interval: Duration) {
        let mut forwarder = self.forwarder.lock();
        if forwarder.is_some() {
            tracing::debug!("location updates already running");
            return;
        }

        publish(&self.status, LocationStatus::Loading);
        self.provider.start(min_interval);
        tracing::info!(interval_ms = min_interval.as_millis() as u64, "location updates started");

        let mut provider_status = self.provider.status();
        let status = Arc::clone(&self.status);
        *forwarder = Some(tokio::spawn(async move {
            loop {
                let next = provider_status.borrow_and_update().clone();
                match next {
                    // The provider resets to Initial when stopped; while we
                    // are tracking that only means "no fix yet".
                    LocationStatus::Initial | LocationStatus::Loading => {}
                    LocationStatus::Error(message) => {
                        tracing::warn!("location provider unavailable: {}", message);
                        publish(&status, LocationStatus::Error(message));
                    }
                    LocationStatus::Available(point) => {
                        publish(&status, LocationStatus::Available(point));
                    }
                }
                if provider_status.changed().await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel the subscription and reset the status to `Initial`.
    pub fn stop_updates(&self) {
        if let Some(task) = self.forwarder.lock().take() {
            task.abort();
            self.provider.stop();
            tracing::info!("location updates stopped");
        }
        publish(&self.status, LocationStatus::Initial);
    }

    pub fn is_tracking(&self) -> bool {
        self.forwarder.lock().is_some()
    }

    pub fn status(&self) -> watch::Receiver<LocationStatus> {
        self.status.subscribe()
    }

    pub fn current(&self) -> LocationStatus {
        self.status.borrow().clone()
    }
}

impl Drop for LocationTracker {
    fn drop(&mut self) {
        if let Some(task) = self.forwarder.lock().take() {
            task.abort();
            self.provider.stop();
        }
    }
}

fn publish(status: &watch::Sender<LocationStatus>, next: LocationStatus) {
    status.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SimulatedLocationProvider;
    use crate::domain::LatLng;

    async fn next_status(rx: &mut watch::Receiver<LocationStatus>) -> LocationStatus {
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("status change")
            .unwrap();
        rx.borrow_and_update().clone()
    }

    #[tokio::test]
    async fn start_moves_to_loading_then_available() {
        let provider = Arc::new(SimulatedLocationProvider::new());
        let tracker = LocationTracker::new(provider.clone());
        let mut rx = tracker.status();

        tracker.start_updates(Duration::from_secs(5));
        assert_eq!(next_status(&mut rx).await, LocationStatus::Loading);
        assert_eq!(provider.last_interval(), Some(Duration::from_secs(5)));

        provider.push_fix(LatLng::new(1.0, 2.0));
        assert_eq!(
            next_status(&mut rx).await,
            LocationStatus::Available(LatLng::new(1.0, 2.0))
        );
    }

    #[tokio::test]
    async fn provider_unavailability_is_a_status() {
        let provider = Arc::new(SimulatedLocationProvider::new());
        let tracker = LocationTracker::new(provider.clone());
        let mut rx = tracker.status();
        tracker.start_updates(Duration::from_secs(1));
        next_status(&mut rx).await;

        provider.report_unavailable("gps off");
        assert_eq!(
            next_status(&mut rx).await,
            LocationStatus::Error("gps off".to_string())
        );
    }

    #[tokio::test]
    async fn stop_resets_to_initial() {
        let provider = Arc::new(SimulatedLocationProvider::new());
        let tracker = LocationTracker::new(provider.clone());
        tracker.start_updates(Duration::from_secs(1));
        tracker.stop_updates();

        assert_eq!(tracker.current(), LocationStatus::Initial);
        assert!(!provider.is_running());
        assert!(!tracker.is_tracking());
    }

    #[tokio::test]
    async fn second_start_is_noop() {
        let provider = Arc::new(SimulatedLocationProvider::new());
        let tracker = LocationTracker::new(provider.clone());
        tracker.start_updates(Duration::from_secs(1));
        tracker.start_updates(Duration::from_secs(1));
        assert_eq!(provider.start_calls(), 1);
    }
}
