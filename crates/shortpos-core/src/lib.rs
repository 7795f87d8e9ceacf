//! Question answering over short-selling position disclosures
//!
//! This crate turns free-text questions such as "What are the most shorted
//! stocks in Italy?" into deterministic answers computed from a table of
//! position disclosures. It includes:
//!
//! - An intent router that recognizes a closed set of phrasings and extracts
//!   country names
//! - A permissive date normalizer that maps unparseable dates to a sentinel
//! - Analytic operations: trend, reporting timeliness, comparison, sectoral
//!   insight and top shorted stocks
//! - Record stores (SQLite and in-memory) and CSV ingestion with cleaning
//!
//! # Example
//!
//! ```rust,ignore
//! use shortpos_core::{ShortPositionEngine, SqliteStore};
//!
//! let store = SqliteStore::open("short_positions.db")?;
//! let engine = ShortPositionEngine::new(store);
//!
//! let answer = engine.answer("How does Sweden compare to Norway?")?;
//! println!("{answer}");
//! ```

pub mod analytics;
pub mod answer;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod record;
pub mod router;
pub mod store;

pub use answer::{Answer, CountrySide, IssuerPosition, TrendPoint, UNRECOGNIZED_REPLY};
pub use config::AnalyticsConfig;
pub use engine::ShortPositionEngine;
pub use error::{Result, ShortPosError};
pub use ingest::{IngestOptions, IngestReport};
pub use record::{PositionDate, PositionRecord, PositionTable, StoredPosition};
pub use router::{Intent, IntentKind, IntentRouter};
pub use store::{MemoryStore, RecordStore, SqliteStore};
