#![forbid(unsafe_code)]

//! Core record keeping for the fitlog fitness tracker.
//!
//! This crate provides:
//! - The validated fitness entry and its CSV line format
//! - CSV persistence with tolerant loading
//! - An owned, ordered in-memory journal
//! - Configuration and logging setup

pub mod error;
pub mod entry;
pub mod store;
pub mod journal;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use entry::{parse_decimal, EntryPatch, Field, FitnessEntry, CSV_HEADER};
pub use store::CsvStore;
pub use journal::Journal;
pub use config::Config;
