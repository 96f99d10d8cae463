//! Key-value persistence trait
//!
//! The record store reads and writes whole JSON blobs through this trait; it
//! never performs partial or incremental writes.

use crate::domain::Result;

/// Durable string-keyed store
///
/// Implementations must make a successful `set` visible to every later `get`
/// on the same instance.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
