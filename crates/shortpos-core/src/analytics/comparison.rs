use super::top_position;
use crate::answer::{Answer, CountrySide, title_case};
use crate::record::PositionTable;

fn side(table: &PositionTable, country: &str) -> CountrySide {
    CountrySide {
        country: title_case(country),
        top: top_position(&table.for_country(country)),
    }
}

/// Top issuer for each of two countries.
///
/// A country without rows is reported on its own line; the other side is
/// still reported.
pub fn comparison(table: &PositionTable, first: &str, second: &str) -> Answer {
    tracing::info!("Comparing short positions between: {} and {}", first, second);

    Answer::Comparison {
        first: side(table, first),
        second: side(table, second),
    }
}

/// Top issuer for each of two countries, stopping at the first country without rows.
pub fn sectoral_insight(table: &PositionTable, first: &str, second: &str) -> Answer {
    tracing::info!("Comparing {} with {} for sectoral insights", first, second);

    let first = side(table, first);
    if first.top.is_none() {
        return Answer::NoData {
            country: first.country,
        };
    }

    let second = side(table, second);
    if second.top.is_none() {
        return Answer::NoData {
            country: second.country,
        };
    }

    Answer::SectoralInsight { first, second }
}
