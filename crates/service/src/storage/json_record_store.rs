use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, error, info, warn};

use crate::errors::ServiceError;
use crate::observability;

/// A record held by [`JsonRecordStore`]: serializable and keyed by a
/// store-assigned positive integer id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

struct State<T> {
    records: Vec<T>,
    next_id: u64,
}

/// Working copy handed to a mutation. Changes only become visible once the
/// whole collection has been written back to disk.
pub struct Draft<T> {
    pub records: Vec<T>,
    next_id: u64,
}

impl<T: Record> Draft<T> {
    /// Hand out the next sequential id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }
}

/// Generic JSON file-backed record collection.
///
/// Keeps a `Vec<T>` in memory in insertion order and rewrites the whole
/// backing file (a pretty-printed JSON array) after every mutation. The
/// write lock is held from the start of a mutation until the file write
/// finished, so mutations on one store are applied one at a time and a
/// failed write leaves the in-memory state untouched.
pub struct JsonRecordStore<T> {
    name: &'static str,
    inner: RwLock<State<T>>,
    file_path: PathBuf,
}

impl<T: Record> JsonRecordStore<T> {
    /// Load the store from `path`.
    ///
    /// A missing file is the normal bootstrap case: the collection starts
    /// empty and an empty array is written right away. A file that exists
    /// but does not parse is reported as [`ServiceError::Corrupt`] instead of
    /// being silently replaced.
    pub async fn open<P: Into<PathBuf>>(name: &'static str, path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let records: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {
                warn!(store = name, path = %file_path.display(), "state file is empty; starting with no records");
                Vec::new()
            }
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                error!(store = name, path = %file_path.display(), error = %e, "state file does not parse");
                ServiceError::Corrupt(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(store = name, path = %file_path.display(), "state file missing; creating a new one");
                let empty: Vec<T> = Vec::new();
                write_records(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Storage(format!("{}: {e}", file_path.display()))),
        };

        let next_id = records.iter().map(Record::id).max().map_or(1, |max| max + 1);
        debug!(store = name, count = records.len(), next_id, "state loaded");
        observability::set_record_count(name, records.len());

        Ok(Self { name, inner: RwLock::new(State { records, next_id }), file_path })
    }

    /// Records in stored order, truncated to `limit` entries when given.
    pub async fn list(&self, limit: Option<usize>) -> Vec<T> {
        let state = self.inner.read().await;
        let take = limit.unwrap_or(state.records.len());
        state.records.iter().take(take).cloned().collect()
    }

    /// Linear search by id.
    pub async fn get(&self, id: u64) -> Option<T> {
        let state = self.inner.read().await;
        state.records.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Apply `f` to a working copy of the collection, persist it, then
    /// publish it. If `f` fails nothing is written; if the write fails the
    /// previous state stays in place.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Draft<T>) -> Result<R, ServiceError>,
    {
        let mut state = self.inner.write().await;
        let mut draft = Draft { records: state.records.clone(), next_id: state.next_id };
        let out = f(&mut draft)?;

        if let Err(e) = write_records(&self.file_path, &draft.records).await {
            error!(store = self.name, path = %self.file_path.display(), error = %e, "failed to persist state");
            observability::record_write_error(self.name);
            return Err(e);
        }

        observability::set_record_count(self.name, draft.records.len());
        state.records = draft.records;
        state.next_id = draft.next_id;
        Ok(out)
    }

    /// Remove a record by id and persist; returns the removed record.
    pub async fn remove(&self, id: u64) -> Result<Option<T>, ServiceError> {
        self.mutate(|draft| Ok(draft.position(id).map(|idx| draft.records.remove(idx))))
            .await
    }
}

async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
    fs::write(path, data)
        .await
        .map_err(|e| ServiceError::Storage(format!("{}: {e}", path.display())))
}
