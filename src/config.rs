use crate::domain::ports::RecordStoreBox;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryRecordStore;
use std::path::PathBuf;

/// Where submitted applications are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path to a persistent database. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(db_path: Option<PathBuf>) -> Self {
        Self { db_path }
    }

    /// Builds the configured store.
    ///
    /// Without the `storage-rocksdb` feature a requested db path is ignored
    /// with a warning and the in-memory store is used instead.
    pub fn build_store(&self) -> Result<RecordStoreBox> {
        match &self.db_path {
            None => Ok(Box::new(InMemoryRecordStore::new())),
            Some(path) => open_persistent(path),
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent(path: &std::path::Path) -> Result<RecordStoreBox> {
    use crate::infrastructure::rocksdb::RocksDBStore;

    tracing::debug!(path = %path.display(), "opening RocksDB store");
    Ok(Box::new(RocksDBStore::open(path)?))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent(path: &std::path::Path) -> Result<RecordStoreBox> {
    tracing::warn!(
        path = %path.display(),
        "persistent storage requested but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
    );
    Ok(Box::new(InMemoryRecordStore::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_in_memory() {
        assert_eq!(StorageConfig::default().db_path, None);
        assert!(StorageConfig::default().build_store().is_ok());
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    #[test]
    fn test_db_path_falls_back_without_feature() {
        let config = StorageConfig::new(Some(PathBuf::from("unused_db")));
        assert!(config.build_store().is_ok());
        assert!(!std::path::Path::new("unused_db").exists());
    }
}
