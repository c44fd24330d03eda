//! JsonFileRecordStore - a single JSON document file holding the collection.
//!
//! Every write builds the next collection, replaces the file atomically
//! (temp file in the same directory, fsync, rename) and only then publishes
//! the new snapshot. A failed write leaves both the file and the served
//! state as they were. Writes run on their own task, so a caller that stops
//! waiting cannot leave the file ahead of the served state.
//!
//! Readers clone the published `Arc<Collection>` and never wait on disk I/O.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::collection::Collection;
use super::{RecordStore, StoreError};
use crate::record::{MenuDraft, MenuId, MenuRecord};

#[derive(Clone)]
pub struct JsonFileRecordStore {
    path: Arc<PathBuf>,
    snapshot: Arc<RwLock<Arc<Collection>>>,
    /// Serializes writers; held across the disk write.
    writer: Arc<Mutex<()>>,
}

impl JsonFileRecordStore {
    /// Load the collection from `path`, creating an empty document (and its
    /// parent directory) when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let load_path = path.clone();
        let collection = tokio::task::spawn_blocking(move || load(&load_path))
            .await
            .map_err(|e| StoreError::Io(e.to_string()))??;

        info!(path = %path.display(), records = collection.len(), "record store opened");
        Ok(Self {
            path: Arc::new(path),
            snapshot: Arc::new(RwLock::new(Arc::new(collection))),
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn current(&self, operation: &'static str) -> Result<Arc<Collection>, StoreError> {
        current(&self.snapshot, operation)
    }

    /// Apply `mutate` to a copy of the collection, persist the copy, then
    /// publish it. The whole sequence runs on a spawned task and completes
    /// even if the returned future is dropped.
    async fn commit<T, F>(&self, operation: &'static str, mutate: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Collection) -> Result<T, StoreError> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        let snapshot = Arc::clone(&self.snapshot);
        let writer = Arc::clone(&self.writer);

        let task = tokio::spawn(async move {
            let _writing = writer.lock().await;
            let base: Arc<Collection> = current(&snapshot, operation)?;
            let mut next = Collection::clone(&base);
            let out = mutate(&mut next)?;

            let bytes = serde_json::to_vec_pretty(&next)?;
            let records = next.len();
            tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
                .await
                .map_err(|e| StoreError::Io(e.to_string()))??;

            *snapshot
                .write()
                .map_err(|_| StoreError::LockPoisoned(operation))? = Arc::new(next);
            debug!(operation, records, "document rewritten");
            Ok(out)
        });

        task.await.map_err(|e| StoreError::Io(e.to_string()))?
    }
}

fn current(
    snapshot: &RwLock<Arc<Collection>>,
    operation: &'static str,
) -> Result<Arc<Collection>, StoreError> {
    snapshot
        .read()
        .map(|guard| Arc::clone(&guard))
        .map_err(|_| StoreError::LockPoisoned(operation))
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn find_all(&self) -> Result<Vec<MenuRecord>, StoreError> {
        Ok(self.current("find_all")?.newest_first())
    }

    async fn find_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.current("find_by_id")?.get(id)
    }

    async fn insert(&self, draft: MenuDraft) -> Result<MenuRecord, StoreError> {
        let draft = draft.validated()?;
        self.commit("insert", move |c| Ok(c.insert(draft, Utc::now())))
            .await
    }

    async fn update_by_id(
        &self,
        id: &MenuId,
        draft: MenuDraft,
    ) -> Result<MenuRecord, StoreError> {
        let draft = draft.validated()?;
        let id = id.clone();
        self.commit("update_by_id", move |c| c.update(&id, draft, Utc::now()))
            .await
    }

    async fn delete_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        let id = id.clone();
        self.commit("delete_by_id", move |c| c.remove(&id)).await
    }
}

fn load(path: &Path) -> Result<Collection, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Collection::default()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let empty = Collection::default();
            write_atomically(path, &serde_json::to_vec_pretty(&empty)?)?;
            Ok(empty)
        }
        Err(err) => Err(err.into()),
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error.to_string()))?;
    Ok(())
}
