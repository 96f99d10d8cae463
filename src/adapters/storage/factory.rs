//! Storage backend factory

use super::file::FileStore;
use super::memory::MemoryStore;
use super::traits::KeyValueStore;
use crate::config::schema::{StorageBackend, StorageConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a key-value store based on the storage configuration
///
/// # Errors
///
/// Returns an error if the file backend cannot create its data directory.
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore + Send + Sync>> {
    match config.backend {
        StorageBackend::File => {
            tracing::info!(data_dir = %config.data_dir.display(), "Creating file store");
            let store = FileStore::new(&config.data_dir)?;
            Ok(Arc::new(store) as Arc<dyn KeyValueStore + Send + Sync>)
        }
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory store; data will not outlive the process");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore + Send + Sync>)
        }
    }
}
