use crate::answer::{Answer, TrendPoint, title_case};
use crate::record::PositionTable;

/// The `window` most recent positions for a country, oldest first.
///
/// Rows are sorted by date with a stable sort; unknown dates sort before
/// every known date, so they only appear when fewer than `window` rows
/// carry a known date.
pub fn trend(table: &PositionTable, country: &str, window: usize) -> Answer {
    let country_name = title_case(country);
    tracing::info!("Querying trend for country: {}", country);

    let mut rows = table.for_country(country);
    if rows.is_empty() {
        return Answer::NoData { country: country_name };
    }

    // Unknown dates sort first, so the window keeps the latest known dates.
    // A NaT-last ordering would instead fill the window with unknowns.
    rows.sort_by_key(|row| row.position_date);
    let skip = rows.len().saturating_sub(window);

    let points: Vec<TrendPoint> = rows
        .into_iter()
        .skip(skip)
        .map(|row| TrendPoint {
            position_date: row.position_date,
            net_short_position: row.net_short_position,
        })
        .collect();

    if points.is_empty() {
        return Answer::InsufficientData {
            country: country_name,
            window,
        };
    }

    Answer::Trend {
        country: country_name,
        points,
    }
}
