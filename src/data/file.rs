//! JSON file persistence for markers and the last map position.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use super::error::RepositoryError;
use super::memory::{upsert, ByIdWatchers, IdSequence};
use super::repository::{LastPositionRepository, MarkerRepository};
use crate::domain::{GeoMarker, LatLng, MarkerId, NEW_MARKER_ID};

const MARKERS_FILE: &str = "markers.json";
const POSITION_FILE: &str = "last_position.json";

/// On-disk shape of `markers.json`.
///
/// Older files hold a bare list; they are read with a high-water mark of
/// the largest stored id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum MarkersFile {
    Tracked {
        last_id: MarkerId,
        markers: Vec<GeoMarker>,
    },
    Plain(Vec<GeoMarker>),
}

impl MarkersFile {
    fn into_parts(self) -> (MarkerId, Vec<GeoMarker>) {
        match self {
            MarkersFile::Tracked { last_id, markers } => (last_id, markers),
            MarkersFile::Plain(markers) => (NEW_MARKER_ID, markers),
        }
    }
}

/// File-backed store implementing both repositories.
///
/// The marker list and the last assigned id live in `markers.json`; the
/// last position in
/// `last_position.json`. Writes go to a temporary file which is renamed
/// over the target, and the live views are only updated after the file
/// was written, so a failed write leaves observers on the old value.
pub struct JsonFileStore {
    dir: PathBuf,
    markers: watch::Sender<Vec<GeoMarker>>,
    ids: IdSequence,
    by_id: ByIdWatchers,
    position: watch::Sender<Option<LatLng>>,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or create) a store in `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RepositoryError::Write {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;

        let (last_id, markers) = read_json::<MarkersFile>(&dir.join(MARKERS_FILE))
            .await?
            .map(MarkersFile::into_parts)
            .unwrap_or_default();
        let ids = IdSequence::resume(last_id, &markers);
        let position: Option<LatLng> = read_json(&dir.join(POSITION_FILE)).await?;
        tracing::info!(
            "Opened marker store at {} ({} markers)",
            dir.display(),
            markers.len()
        );

        Ok(Self {
            dir,
            markers: watch::channel(markers).0,
            ids,
            by_id: ByIdWatchers::default(),
            position: watch::channel(position).0,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn commit_markers(&self, markers: Vec<GeoMarker>) -> Result<(), RepositoryError> {
        let file = MarkersFile::Tracked {
            last_id: self.ids.last(),
            markers,
        };
        write_json(&self.dir.join(MARKERS_FILE), &file).await?;
        let (_, markers) = file.into_parts();
        self.by_id.refresh(&markers);
        self.markers.send_replace(markers);
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(RepositoryError::Unavailable(e.to_string())),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| RepositoryError::Decode {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let write_error = |message: String| RepositoryError::Write {
        path: path.display().to_string(),
        message,
    };
    let content = serde_json::to_string_pretty(value).map_err(|e| write_error(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| write_error(e.to_string()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| write_error(e.to_string()))
}

#[async_trait]
impl MarkerRepository for JsonFileStore {
    async fn save_marker(&self, marker: &GeoMarker) -> Result<MarkerId, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut markers = self.markers.borrow().clone();
        let id = upsert(&mut markers, marker, &self.ids);
        self.commit_markers(markers).await?;
        tracing::debug!(marker_id = id, "marker saved");
        Ok(id)
    }

    async fn delete_marker(&self, id: MarkerId) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut markers = self.markers.borrow().clone();
        let before = markers.len();
        markers.retain(|m| m.id != id);
        if markers.len() == before {
            return Err(RepositoryError::NotFound { id });
        }
        self.commit_markers(markers).await?;
        tracing::debug!(marker_id = id, "marker deleted");
        Ok(())
    }

    async fn markers(&self) -> Result<watch::Receiver<Vec<GeoMarker>>, RepositoryError> {
        Ok(self.markers.subscribe())
    }

    async fn marker_by_id(
        &self,
        id: MarkerId,
    ) -> Result<watch::Receiver<Option<GeoMarker>>, RepositoryError> {
        Ok(self.by_id.subscribe(id, &self.markers.borrow()))
    }
}

#[async_trait]
impl LastPositionRepository for JsonFileStore {
    async fn last_position(&self) -> Result<Option<LatLng>, RepositoryError> {
        Ok(*self.position.borrow())
    }

    fn last_position_stream(&self) -> watch::Receiver<Option<LatLng>> {
        self.position.subscribe()
    }

    async fn update_last_position(&self, position: LatLng) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.dir.join(POSITION_FILE), &position).await?;
        self.position.send_replace(Some(position));
        Ok(())
    }
}
