//! Best-effort local snapshot of the résumé state.
//!
//! The whole state lives under one well-known key (`resume-storage`), stored as a JSON
//! envelope in `<data_dir>/resume-storage.json`. It is read once at startup and rewritten
//! after every mutation by a background writer. Nothing here can fail a mutation:
//! load falls back to the initial state, save failures are logged and dropped.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::resume::models::ResumeState;

pub const STORAGE_KEY: &str = "resume-storage";
const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("snapshot rename failed: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("unsupported snapshot version {0}")]
    Version(u32),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEnvelope<S> {
    version: u32,
    saved_at: DateTime<Utc>,
    state: S,
}

/// Location of the snapshot file plus synchronous load/save.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path) -> Self {
        SnapshotStore {
            dir: data_dir.to_path_buf(),
            path: data_dir.join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved state, or the canonical initial state if there is none or it is unreadable.
    pub fn load(&self) -> ResumeState {
        if !self.path.exists() {
            info!("No snapshot at {}; starting empty", self.path.display());
            return ResumeState::default();
        }
        match self.read() {
            Ok(state) => {
                info!("Loaded snapshot from {}", self.path.display());
                state
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable snapshot at {}: {e}",
                    self.path.display()
                );
                ResumeState::default()
            }
        }
    }

    fn read(&self) -> Result<ResumeState, SnapshotError> {
        let raw = fs::read_to_string(&self.path)?;
        let envelope: SnapshotEnvelope<ResumeState> = serde_json::from_str(&raw)?;
        if envelope.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(envelope.version));
        }
        Ok(envelope.state)
    }

    /// Writes the snapshot atomically: temp file in the same directory, then rename.
    pub fn save(&self, state: &ResumeState) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.dir)?;
        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &envelope)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Background writer
// ────────────────────────────────────────────────────────────────────────────

/// Fire-and-forget hand-off of new states to the background writer.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    tx: Option<mpsc::UnboundedSender<Arc<ResumeState>>>,
}

impl SnapshotWriter {
    /// Spawns the writer task. It exits once every `SnapshotWriter` clone is dropped and the
    /// last pending state has been written, so awaiting the handle flushes the snapshot.
    pub fn spawn(store: SnapshotStore) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(Arc::new(store), rx));
        (SnapshotWriter { tx: Some(tx) }, handle)
    }

    /// A writer that drops everything. Used when persistence is not wanted (tests).
    pub fn disabled() -> Self {
        SnapshotWriter { tx: None }
    }

    pub fn submit(&self, state: Arc<ResumeState>) {
        if let Some(tx) = &self.tx {
            if tx.send(state).is_err() {
                warn!("Snapshot writer has stopped; state not persisted");
            }
        }
    }
}

async fn run_writer(store: Arc<SnapshotStore>, mut rx: mpsc::UnboundedReceiver<Arc<ResumeState>>) {
    while let Some(mut latest) = rx.recv().await {
        // Coalesce a burst of mutations into one write of the newest state.
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }
        let store = Arc::clone(&store);
        match tokio::task::spawn_blocking(move || store.save(&latest)).await {
            Ok(Ok(())) => debug!("Snapshot written"),
            Ok(Err(e)) => warn!("Snapshot write failed: {e}"),
            Err(e) => warn!("Snapshot write task failed: {e}"),
        }
    }
    debug!("Snapshot writer stopped");
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
