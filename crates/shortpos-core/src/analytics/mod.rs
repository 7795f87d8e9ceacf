//! Analytic operations over a position table
//!
//! Every operation filters the table by exact, case-insensitive country
//! equality and returns an [`Answer`](crate::Answer). Empty filters and
//! missing dates are reported as answers, never as errors.

mod comparison;
mod timeliness;
mod top_shorted;
mod trend;

pub use comparison::{comparison, sectoral_insight};
pub use timeliness::timeliness;
pub use top_shorted::top_shorted;
pub use trend::trend;

use crate::answer::IssuerPosition;
use crate::record::PositionRecord;

/// Highest finite net short position, first occurrence winning ties.
pub(crate) fn top_position(rows: &[&PositionRecord]) -> Option<IssuerPosition> {
    let mut best: Option<&PositionRecord> = None;
    for row in rows.iter().copied().filter(|row| row.net_short_position.is_finite()) {
        if best.is_none_or(|b| row.net_short_position > b.net_short_position) {
            best = Some(row);
        }
    }
    best.map(|row| IssuerPosition {
        issuer: row.issuer.clone(),
        net_short_position: row.net_short_position,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::record::{PositionDate, PositionRecord, PositionTable};
    use chrono::NaiveDate;

    pub fn date(y: i32, m: u32, d: u32) -> PositionDate {
        PositionDate::Known(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    pub fn row(country: &str, issuer: &str, net: f64, position_date: PositionDate) -> PositionRecord {
        PositionRecord {
            country: country.to_string(),
            position_holder: "Holder AB".to_string(),
            issuer: issuer.to_string(),
            position_date,
            net_short_position: net,
            orig_short_position: None,
        }
    }

    pub fn table(rows: Vec<PositionRecord>) -> PositionTable {
        PositionTable::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::record::PositionDate;

    #[test]
    fn test_top_position_first_occurrence_wins() {
        let a = row("Spain", "First", 3.0, PositionDate::Unknown);
        let b = row("Spain", "Second", 3.0, PositionDate::Unknown);
        let c = row("Spain", "Lower", 1.0, PositionDate::Unknown);

        let top = top_position(&[&c, &a, &b]).unwrap();
        assert_eq!(top.issuer, "First");
        assert!(top_position(&[]).is_none());
    }

    #[test]
    fn test_top_position_skips_non_finite() {
        let broken = row("Italy", "Broken", f64::NAN, PositionDate::Unknown);
        let real = row("Italy", "StockB", 30.0, PositionDate::Unknown);

        let top = top_position(&[&broken, &real]).unwrap();
        assert_eq!(top.issuer, "StockB");
        assert!(top_position(&[&broken]).is_none());
    }
}
