#![forbid(unsafe_code)]

//! Core domain model and storage for AquaTrack.
//!
//! This crate provides:
//! - Domain types (categories, usage records, the usage log)
//! - CSV persistence, export and clearing
//! - Entry recording, date lookup and per-category totals
//! - Spoken announcements

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod recorder;
pub mod summary;
pub mod lookup;
pub mod export;
pub mod clear;
pub mod voice;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use recorder::{parse_liters, record_entry, today, Readings};
pub use summary::CategoryTotals;
pub use lookup::{find_by_date, format_records};
pub use export::export_log;
pub use clear::{clear_data, ClearOutcome};
pub use voice::{Announcer, SilentAnnouncer, SpeechAnnouncer};
