//! Record store
//!
//! [`RecordStore`] is the single owner of subjects and exams. The global exam
//! list is the source of truth; per-subject views are derived through an
//! index on read, and every mutation persists the affected list wholesale.
//!
//! # Example
//!
//! ```rust
//! use aso_control::adapters::storage::MemoryStore;
//! use aso_control::core::store::{RecordStore, StoreSettings};
//! use aso_control::core::mock::MockOptions;
//! use aso_control::domain::Variant;
//! use chrono::Utc;
//! use std::sync::Arc;
//!
//! # fn example() -> aso_control::domain::Result<()> {
//! let backend = Arc::new(MemoryStore::new());
//! let mut store = RecordStore::open(backend, StoreSettings::new(Variant::Occupational))?;
//!
//! let report = store.initialize(Utc::now(), Some(&MockOptions::new(5, 42)))?;
//! assert_eq!(report.seeded_subjects, 5);
//! println!("adherence: {}%", store.indicators().adherence_percentage);
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod record_store;
pub mod settings;
pub mod view;

pub use filter::{matches_search, DashboardFilter, SubjectFilter};
pub use record_store::{Dashboard, ExamDetails, ImportSummary, InitReport, RecordStore};
pub use settings::StoreSettings;
pub use view::SubjectView;
