//! # PMR Core
//!
//! Core business logic for the PMR patient record system.
//!
//! This crate contains pure data operations:
//! - Patient validation and BMI/verdict derivation
//! - The insertion-ordered patient store and its sort view
//! - The persistence port, with JSON-file and in-memory adapters
//! - [`PatientService`], which runs each operation as one serialised read-modify-write
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `pmr-api-rest`
//! and `pmr-cli`.

pub mod bmi;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod repository;
pub mod service;
pub mod sort;
pub mod store;
pub mod validation;

pub use bmi::Verdict;
pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENT_DATA_FILE;
pub use error::{PatientError, PatientResult};
pub use patient::{NewPatient, PatientDetails, PatientRecord, PatientUpdate};
pub use repository::{InMemoryRepository, JsonFileRepository, PatientRepository};
pub use service::PatientService;
pub use sort::{SortField, SortOrder};
pub use store::PatientStore;

// Re-export the validated primitives so downstream crates need only this crate.
pub use pmr_types::{Gender, NonEmptyText, PatientId, TextError};
