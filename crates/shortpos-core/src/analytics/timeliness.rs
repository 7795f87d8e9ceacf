use chrono::NaiveDateTime;

use crate::answer::{Answer, title_case};
use crate::record::PositionTable;

const SECONDS_PER_DAY: i64 = 86_400;

/// Mean number of whole days between each known position date and `now`.
pub fn timeliness(table: &PositionTable, country: &str, now: NaiveDateTime) -> Answer {
    let country_name = title_case(country);
    tracing::info!("Querying timeliness for country: {}", country);

    let rows = table.for_country(country);
    if rows.is_empty() {
        return Answer::NoData { country: country_name };
    }

    let elapsed_days: Vec<i64> = rows
        .iter()
        .filter_map(|row| row.position_date.known())
        .map(|date| (now - date).num_seconds().div_euclid(SECONDS_PER_DAY))
        .collect();

    if elapsed_days.is_empty() {
        tracing::info!("No valid position dates found for country: {}", country_name);
        return Answer::NoValidDates { country: country_name };
    }

    let average_days = elapsed_days.iter().sum::<i64>() as f64 / elapsed_days.len() as f64;
    tracing::info!("Average timeliness for {}: {:.2} days", country_name, average_days);

    Answer::Timeliness {
        country: country_name,
        average_days,
    }
}
