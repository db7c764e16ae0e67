//! Bounded retry for live marker reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::repository::MarkerRepository;
use crate::domain::{GeoMarker, MarkersState};

/// Fixed-backoff retry policy for opening a live read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Stream the marker list into `on_state` until the source closes.
///
/// Emits `Loading` first, then `Loaded` for every list the repository
/// publishes. If the subscription cannot be opened after
/// `policy.max_attempts` tries, emits `Error` and returns.
pub async fn observe_markers<F>(
    repository: Arc<dyn MarkerRepository>,
    policy: RetryPolicy,
    mut on_state: F,
) where
    F: FnMut(MarkersState),
{
    on_state(MarkersState::Loading);

    let mut rx = match open_with_retry(repository.as_ref(), policy).await {
        Ok(rx) => rx,
        Err(message) => {
            on_state(MarkersState::Error(message));
            return;
        }
    };

    loop {
        let markers = rx.borrow_and_update().clone();
        on_state(MarkersState::Loaded(markers));
        if rx.changed().await.is_err() {
            tracing::debug!("marker source closed");
            break;
        }
    }
}

async fn open_with_retry(
    repository: &dyn MarkerRepository,
    policy: RetryPolicy,
) -> Result<watch::Receiver<Vec<GeoMarker>>, String> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        match repository.markers().await {
            Ok(rx) => return Ok(rx),
            Err(err) => {
                tracing::warn!(attempt, max_attempts = attempts, "marker read failed: {}", err);
                last_error = err.to_string();
            }
        }
        if attempt < attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }
    Err(last_error)
}
