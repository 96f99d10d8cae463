// ASO Control - Exam Lifecycle and Adherence Tracking
// Copyright (c) 2025 ASO Control Contributors
// Licensed under the MIT License

//! # ASO Control - Exam Lifecycle and Adherence Tracking
//!
//! ASO Control tracks employees and their occupational health certificate
//! (ASO) exams, or patients and their clinical exams, and reports how much of
//! the population is up to date.
//!
//! ## Overview
//!
//! This library provides:
//! - **Lifecycle**: expiration dates with end-of-month clamping, expiry
//!   classification and the completed → expired refresh
//! - **Adherence**: indicator cards, twelve monthly buckets, per-type tallies
//! - **Record store**: subjects and exams behind a closed set of commands,
//!   persisted wholesale after every mutation
//! - **Exchange**: lossless JSON export and import
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (lifecycle, adherence, store, reports)
//! - [`adapters`] - Key-value persistence backends
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use aso_control::adapters::storage::MemoryStore;
//! use aso_control::core::lifecycle::parse_date;
//! use aso_control::core::store::{RecordStore, StoreSettings};
//! use aso_control::domain::{ExamStatus, ExamType, NewExam, Variant};
//! use aso_control::core::mock::MockOptions;
//! use std::sync::Arc;
//!
//! # fn main() -> aso_control::domain::Result<()> {
//! let now = parse_date("2024-06-15")?;
//! let mut store = RecordStore::open(
//!     Arc::new(MemoryStore::new()),
//!     StoreSettings::new(Variant::Occupational),
//! )?;
//! store.initialize(now, Some(&MockOptions::new(10, 42)))?;
//!
//! let subject = store.subjects()[0].id.clone();
//! let exam = store.add_exam(
//!     NewExam::new(subject, ExamType::Espirometria, now, ExamStatus::Completed),
//!     now,
//! )?;
//! assert_eq!(exam.expiration_date, Some(parse_date("2025-06-15")?));
//!
//! let buckets = store.monthly_adherence(2024);
//! assert_eq!(buckets.len(), 12);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], carrying an
//! [`domain::AsoError`]:
//!
//! ```rust
//! use aso_control::core::lifecycle::compute_expiration_date_str;
//! use aso_control::domain::AsoError;
//!
//! let err = compute_expiration_date_str("not a date", 12).unwrap_err();
//! assert!(matches!(err, AsoError::InvalidDate(_)));
//! ```
//!
//! ## Logging
//!
//! ASO Control uses structured logging with the `tracing` crate; see
//! [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
