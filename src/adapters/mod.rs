//! External system integrations for ASO Control.
//!
//! - [`storage`] - key-value persistence (file and in-memory backends)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The record store talks only to
//! the [`storage::KeyValueStore`] trait.
//!
//! ```rust
//! use aso_control::adapters::storage::{KeyValueStore, MemoryStore};
//!
//! # fn example() -> aso_control::domain::Result<()> {
//! let store = MemoryStore::new();
//! store.set("aso_control_settings_v3", "{}")?;
//! assert_eq!(store.get("aso_control_settings_v3")?.as_deref(), Some("{}"));
//! # Ok(())
//! # }
//! ```

pub mod storage;
