use crate::core::swipe::LikedLog;
use crate::models::{CandidatePet, LikedPet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur reading or writing liked-pets logs
#[derive(Debug, Error)]
pub enum LikesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed liked-pets logs, one JSON file per client
///
/// Appends for one client are serialised on a per-client lock, so sessions
/// sharing a client id never overwrite each other's likes.
#[derive(Clone)]
pub struct LikedPetsStore {
    data_dir: PathBuf,
    locks: moka::future::Cache<String, Arc<Mutex<()>>>,
}

impl LikedPetsStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let locks = moka::future::CacheBuilder::new(10_000)
            .time_to_idle(Duration::from_secs(600))
            .build();

        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            locks,
        }
    }

    async fn client_lock(&self, client_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .get_with(client_id.to_string(), async { Arc::new(Mutex::new(())) })
            .await
    }

    fn path_for(&self, client_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", client_id))
    }

    /// Read a client's log; a missing file is an empty log
    pub async fn load(&self, client_id: &str) -> Result<LikedLog, LikesError> {
        let path = self.path_for(client_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LikedLog::default()),
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<LikedPet> = serde_json::from_slice(&bytes)?;
        tracing::trace!("Loaded {} liked pets for {}", entries.len(), client_id);
        Ok(LikedLog::new(entries))
    }

    /// Write the full log for a client
    pub async fn save(&self, client_id: &str, log: &LikedLog) -> Result<(), LikesError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let path = self.path_for(client_id);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(log.entries())?;

        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::trace!("Saved {} liked pets for {}", log.len(), client_id);
        Ok(())
    }

    /// Append one pet to the client's file and return the log as persisted
    ///
    /// The file is re-read under the client's lock, so entries written by
    /// other sessions are kept.
    pub async fn append(&self, client_id: &str, pet: CandidatePet) -> Result<LikedLog, LikesError> {
        let lock = self.client_lock(client_id).await;
        let _guard = lock.lock().await;

        let mut log = self.load(client_id).await?;
        if log.append(pet) {
            self.save(client_id, &log).await?;
        }
        Ok(log)
    }
}
