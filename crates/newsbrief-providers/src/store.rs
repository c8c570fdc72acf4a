//! Token persistence.
//!
//! The store keeps one [`TokenRecord`] per user. [`FileTokenStore`] persists
//! the full map as JSON, writing atomically and caching in memory behind an
//! `RwLock`; [`MemoryTokenStore`] backs tests and the demo server.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{FeedError, FeedResult};
use crate::tokens::TokenRecord;

/// Storage for per-user token records.
///
/// Implementations must make `upsert` atomic per user: concurrent refreshes
/// for the same user resolve to one of the written records, never a torn mix.
pub trait TokenStore: Send + Sync {
    /// Inserts or replaces the record for `record.user_id`.
    fn upsert(&self, record: TokenRecord) -> FeedResult<()>;

    /// Returns the record for a user, if one exists.
    fn get(&self, user_id: &str) -> FeedResult<Option<TokenRecord>>;

    /// Removes the record for a user. Deleting a missing record succeeds.
    fn delete(&self, user_id: &str) -> FeedResult<()>;
}

/// File-backed token store.
///
/// The whole map is held in memory and flushed to disk on every mutation.
/// Writes go to a temp file first, then rename for atomicity, with 0600
/// permissions on Unix.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    records: RwLock<HashMap<String, TokenRecord>>,
}

impl FileTokenStore {
    /// Opens a store at the given path, loading existing records.
    ///
    /// A missing file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> FeedResult<Self> {
        let path = path.into();
        let records = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                FeedError::persistence(format!("failed to read token file: {e}"))
            })?;
            let records: HashMap<String, TokenRecord> = serde_json::from_str(&content)
                .map_err(|e| {
                    FeedError::persistence(format!("failed to parse token file: {e}"))
                })?;
            info!(count = records.len(), "loaded token records from {:?}", path);
            records
        } else {
            debug!("no token file at {:?}", path);
            HashMap::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, records: &HashMap<String, TokenRecord>) -> FeedResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FeedError::persistence(format!("failed to create token directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| FeedError::persistence(format!("failed to serialize tokens: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)
            .map_err(|e| FeedError::persistence(format!("failed to write token file: {e}")))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| FeedError::persistence(format!("failed to rename token file: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        debug!("saved {} token records to {:?}", records.len(), self.path);
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn upsert(&self, record: TokenRecord) -> FeedResult<()> {
        let mut records = self.records.write().unwrap();
        records.insert(record.user_id.clone(), record);
        self.flush(&records)
    }

    fn get(&self, user_id: &str) -> FeedResult<Option<TokenRecord>> {
        Ok(self.records.read().unwrap().get(user_id).cloned())
    }

    fn delete(&self, user_id: &str) -> FeedResult<()> {
        let mut records = self.records.write().unwrap();
        if records.remove(user_id).is_some() {
            self.flush(&records)?;
            info!(user_id, "removed token record");
        }
        Ok(())
    }
}

/// In-memory token store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    records: RwLock<HashMap<String, TokenRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn upsert(&self, record: TokenRecord) -> FeedResult<()> {
        self.records
            .write()
            .unwrap()
            .insert(record.user_id.clone(), record);
        Ok(())
    }

    fn get(&self, user_id: &str) -> FeedResult<Option<TokenRecord>> {
        Ok(self.records.read().unwrap().get(user_id).cloned())
    }

    fn delete(&self, user_id: &str) -> FeedResult<()> {
        self.records.write().unwrap().remove(user_id);
        Ok(())
    }
}
