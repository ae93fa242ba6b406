//! The résumé session: the one state container owned by the composition root.
//!
//! All mutations go through `apply`, which holds the write lock for exactly one store
//! operation and then hands the new state to the snapshot writer. Reads take an `Arc`
//! of the current state and never wait on disk.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::resume::models::ResumeState;
use crate::resume::store::DocumentStore;
use crate::snapshot::SnapshotWriter;

pub struct ResumeSession {
    store: RwLock<DocumentStore>,
    snapshots: SnapshotWriter,
}

impl ResumeSession {
    pub fn new(initial: ResumeState, snapshots: SnapshotWriter) -> Self {
        ResumeSession {
            store: RwLock::new(DocumentStore::new(initial)),
            snapshots,
        }
    }

    pub async fn current(&self) -> Arc<ResumeState> {
        self.store.read().await.state()
    }

    /// Applies one store operation and schedules a snapshot of the result.
    ///
    /// The snapshot is submitted while the write lock is held, so snapshots reach the
    /// writer in mutation order.
    pub async fn apply<F, R>(&self, op: &'static str, f: F) -> R
    where
        F: FnOnce(&mut DocumentStore) -> R,
    {
        let mut store = self.store.write().await;
        let out = f(&mut store);
        debug!(op, "Applied resume mutation");
        self.snapshots.submit(store.state());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::models::SkillDraft;
    use crate::snapshot::SnapshotStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_apply_publishes_new_state() {
        let session = ResumeSession::new(ResumeState::default(), SnapshotWriter::disabled());
        let before = session.current().await;
        let id = session
            .apply("add_skill", |store| {
                store.add_skill(SkillDraft {
                    name: "Go".to_string(),
                })
            })
            .await;
        let after = session.current().await;
        assert!(before.skills.is_empty());
        assert_eq!(after.skills[0].id, id);
    }

    #[tokio::test]
    async fn test_mutations_are_mirrored_to_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshots = SnapshotStore::new(dir.path());
        let (writer, handle) = SnapshotWriter::spawn(snapshots.clone());
        let session = ResumeSession::new(snapshots.load(), writer);

        session
            .apply("add_skill", |store| {
                store.add_skill(SkillDraft {
                    name: "SQL".to_string(),
                })
            })
            .await;
        session
            .apply("add_custom_section", |store| store.add_custom_section("Awards"))
            .await;
        let expected = session.current().await;
        drop(session);
        handle.await.unwrap();

        assert_eq!(snapshots.load(), *expected);
    }
}
