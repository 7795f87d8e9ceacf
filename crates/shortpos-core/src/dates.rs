//! Date normalization for position records
//!
//! Parsing is permissive: anything that does not parse becomes
//! [`PositionDate::Unknown`] and the row is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::record::{PositionDate, PositionRecord, PositionTable, StoredPosition};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse a raw date string, never failing.
pub fn parse_position_date(raw: &str) -> PositionDate {
    let raw = raw.trim();
    if raw.is_empty() {
        return PositionDate::Unknown;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return PositionDate::Known(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return PositionDate::Known(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(PositionDate::Unknown, PositionDate::Known)
}

/// Turn raw store rows into a table with parsed dates. Row count and order are preserved.
pub fn normalize(rows: Vec<StoredPosition>) -> PositionTable {
    let records = rows
        .into_iter()
        .map(|row| PositionRecord {
            position_date: row
                .position_date
                .as_deref()
                .map_or(PositionDate::Unknown, parse_position_date),
            country: row.country,
            position_holder: row.position_holder,
            issuer: row.issuer,
            net_short_position: row.net_short_position,
            orig_short_position: row.orig_short_position,
        })
        .collect::<Vec<_>>();

    let unknown = records
        .iter()
        .filter(|record| !record.position_date.is_known())
        .count();
    tracing::debug!(
        "Normalized {} records ({} with unknown dates)",
        records.len(),
        unknown
    );

    PositionTable::new(records)
}
