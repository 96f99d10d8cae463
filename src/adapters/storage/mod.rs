//! Persistence layer
//!
//! Trait-based string-keyed storage with two implementations:
//!
//! - [`FileStore`] - one JSON file per key under a data directory
//! - [`MemoryStore`] - volatile, for tests
//!
//! Use [`create_store`] to pick the backend from configuration.

pub mod factory;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use file::FileStore;
pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
