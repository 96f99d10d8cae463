//! Domain models and types for ASO Control.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SubjectId`], [`ExamId`], [`Cpf`])
//! - **Domain models** ([`Subject`], [`Exam`], [`Profile`])
//! - **Error types** ([`AsoError`], [`FieldError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a subject ID can never be passed
//! where an exam ID is expected:
//!
//! ```rust
//! use aso_control::domain::{ExamId, SubjectId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let subject_id = SubjectId::new("employee-1")?;
//! let exam_id = ExamId::new("exam-1")?;
//!
//! // This won't compile:
//! // let wrong: SubjectId = exam_id;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod exam;
pub mod ids;
pub mod result;
pub mod subject;

// Re-export commonly used types for convenience
pub use errors::{AsoError, FieldError};
pub use exam::{Exam, ExamCategory, ExamStatus, ExamType, NewExam};
pub use ids::{Cpf, ExamId, SubjectId};
pub use result::Result;
pub use subject::{
    Address, Gender, NewSubject, Profile, Sector, Subject, SubjectPatch, Variant,
};
