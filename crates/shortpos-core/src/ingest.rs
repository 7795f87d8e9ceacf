//! CSV ingestion with row-level cleaning
//!
//! Rows missing a country, holder, issuer or net position are rejected, as
//! are rows whose net position is not numeric and exact duplicates. Unknown
//! columns (`isin`, `reporting_date`, ...) are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::dates::parse_position_date;
use crate::error::{Result, ShortPosError};
use crate::record::StoredPosition;

/// Ingestion options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Also reject rows whose position date does not parse
    pub strict_dates: bool,
}

/// Counts of what happened to each CSV row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub accepted: usize,
    pub missing_fields: usize,
    pub invalid_positions: usize,
    pub invalid_dates: usize,
    pub duplicates: usize,
}

impl IngestReport {
    pub fn rejected(&self) -> usize {
        self.rows_read - self.accepted
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    country: Option<String>,
    position_holder: Option<String>,
    issuer: Option<String>,
    position_date: Option<String>,
    net_short_position: Option<String>,
    orig_short_position: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.parse::<f64>().ok()).filter(|v| v.is_finite())
}

type DedupKey = (String, String, String, Option<String>, u64, Option<u64>);

fn dedup_key(row: &StoredPosition) -> DedupKey {
    (
        row.country.clone(),
        row.position_holder.clone(),
        row.issuer.clone(),
        row.position_date.clone(),
        row.net_short_position.to_bits(),
        row.orig_short_position.map(f64::to_bits),
    )
}

/// Read and clean positions from any CSV source with a header row.
pub fn read_positions<R: Read>(
    reader: R,
    options: IngestOptions,
) -> Result<(Vec<StoredPosition>, IngestReport)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["country", "issuer", "net_short_position"] {
        if !headers.iter().any(|h| h == required) {
            return Err(ShortPosError::Ingest(format!(
                "missing required column: {required}"
            )));
        }
    }

    let mut report = IngestReport::default();
    let mut seen = HashSet::new();
    let mut accepted = Vec::new();

    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        report.rows_read += 1;
        let line = index + 2;
        let raw = result?;

        let (Some(country), Some(position_holder), Some(issuer), Some(net_raw)) = (
            non_empty(raw.country),
            non_empty(raw.position_holder),
            non_empty(raw.issuer),
            non_empty(raw.net_short_position),
        ) else {
            tracing::warn!("Skipping line {}: missing required field", line);
            report.missing_fields += 1;
            continue;
        };

        let Some(net_short_position) = parse_number(Some(&net_raw)) else {
            tracing::warn!("Skipping line {}: invalid net short position {:?}", line, net_raw);
            report.invalid_positions += 1;
            continue;
        };

        let position_date = non_empty(raw.position_date);
        if options.strict_dates
            && !position_date
                .as_deref()
                .is_some_and(|d| parse_position_date(d).is_known())
        {
            tracing::warn!("Skipping line {}: invalid position date {:?}", line, position_date);
            report.invalid_dates += 1;
            continue;
        }

        let row = StoredPosition {
            country,
            position_holder,
            issuer,
            position_date,
            net_short_position,
            orig_short_position: parse_number(non_empty(raw.orig_short_position).as_deref()),
        };

        if !seen.insert(dedup_key(&row)) {
            report.duplicates += 1;
            continue;
        }

        accepted.push(row);
    }

    report.accepted = accepted.len();
    tracing::info!(
        "Ingested {} of {} rows ({} rejected)",
        report.accepted,
        report.rows_read,
        report.rejected()
    );

    Ok((accepted, report))
}

/// Read and clean positions from a CSV file.
pub fn read_positions_from_path(
    path: impl AsRef<Path>,
    options: IngestOptions,
) -> Result<(Vec<StoredPosition>, IngestReport)> {
    let path = path.as_ref();
    tracing::info!("Loading data from CSV file: {}", path.display());
    read_positions(File::open(path)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
country,position_holder,issuer,isin,position_date,reporting_date,net_short_position,orig_short_position
Italy,Fund A,StockA,IT0001,2023-01-05,2023-01-06,12.5,12.5
Italy,Fund B,StockB,IT0002,2023-01-07,2023-01-08,30.0,
Italy,Fund B,StockB,IT0002,2023-01-07,2023-01-08,30.0,
France,,StockC,FR0001,2023-02-01,2023-02-02,0.7,
France,Fund C,StockD,FR0002,2023-02-01,2023-02-02,n/a,
Germany,Fund D,StockE,DE0001,sometime,2023-03-02,1.1,1.0
";

    #[test]
    fn test_cleaning_policy() {
        let (rows, report) = read_positions(SAMPLE.as_bytes(), IngestOptions::default()).unwrap();

        assert_eq!(report.rows_read, 6);
        assert_eq!(report.accepted, 3);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.missing_fields, 1);
        assert_eq!(report.invalid_positions, 1);
        assert_eq!(report.rejected(), 3);

        assert_eq!(rows[0].issuer, "StockA");
        assert_eq!(rows[0].orig_short_position, Some(12.5));
        assert_eq!(rows[1].orig_short_position, None);
        assert_eq!(rows[2].position_date.as_deref(), Some("sometime"));
    }

    #[test]
    fn test_strict_dates() {
        let options = IngestOptions { strict_dates: true };
        let (rows, report) = read_positions(SAMPLE.as_bytes(), options).unwrap();

        assert_eq!(report.invalid_dates, 1);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.country == "Italy"));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "country,issuer\nItaly,StockA\n";
        let err = read_positions(csv.as_bytes(), IngestOptions::default()).unwrap_err();
        assert!(err.to_string().contains("net_short_position"));
    }
}
