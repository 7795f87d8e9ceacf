//! Position record types and the per-query table snapshot

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position row exactly as the record store holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPosition {
    pub country: String,
    pub position_holder: String,
    pub issuer: String,
    /// Raw date text; parsed later by the date normalizer
    pub position_date: Option<String>,
    /// Net short position as a percentage of issued shares
    pub net_short_position: f64,
    pub orig_short_position: Option<f64>,
}

/// Effective date of a disclosure, or the sentinel for unparseable input.
///
/// `Unknown` orders before every known date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionDate {
    Unknown,
    Known(NaiveDateTime),
}

impl PositionDate {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn known(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Known(dt) => Some(*dt),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for PositionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(dt) => write!(f, "{}", dt.date().format("%Y-%m-%d")),
            Self::Unknown => f.write_str("unknown date"),
        }
    }
}

/// A normalized position row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub country: String,
    pub position_holder: String,
    pub issuer: String,
    pub position_date: PositionDate,
    pub net_short_position: f64,
    pub orig_short_position: Option<f64>,
}

/// Immutable snapshot of every record, in store order
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    records: Vec<PositionRecord>,
}

impl PositionTable {
    pub fn new(records: Vec<PositionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose country equals `country`, ignoring case. Store order is kept.
    pub fn for_country(&self, country: &str) -> Vec<&PositionRecord> {
        let target = country.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.country.to_lowercase() == target)
            .collect()
    }
}
