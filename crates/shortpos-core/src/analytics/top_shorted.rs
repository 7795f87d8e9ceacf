use crate::answer::{Answer, IssuerPosition, title_case};
use crate::record::PositionTable;

/// The `limit` largest net short positions for a country, descending.
///
/// Sorting is stable so equal positions keep store order. Rows without a
/// finite net position are left out of the ranking.
pub fn top_shorted(table: &PositionTable, country: &str, limit: usize) -> Answer {
    let country_name = title_case(country);
    tracing::info!("Querying most shorted stocks for country: {}", country);

    let mut rows = table.for_country(country);
    if rows.is_empty() {
        return Answer::NoData { country: country_name };
    }

    rows.retain(|row| row.net_short_position.is_finite());
    rows.sort_by(|a, b| b.net_short_position.total_cmp(&a.net_short_position));

    let positions = rows
        .into_iter()
        .take(limit)
        .map(|row| IssuerPosition {
            issuer: row.issuer.clone(),
            net_short_position: row.net_short_position,
        })
        .collect();

    Answer::TopShorted {
        country: country_name,
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{row, table};
    use crate::record::PositionDate;

    #[test]
    fn test_italy_example() {
        let table = table(vec![
            row("Italy", "StockA", 12.5, PositionDate::Unknown),
            row("Germany", "Other", 99.0, PositionDate::Unknown),
            row("Italy", "StockB", 30.0, PositionDate::Unknown),
        ]);

        let answer = top_shorted(&table, "italy", 5);
        assert_eq!(
            answer.to_string(),
            "Most shorted stocks in Italy:\n\
             StockB: 30.0% short position\n\
             StockA: 12.5% short position\n"
        );
    }

    #[test]
    fn test_limits_to_five_descending() {
        let nets = [1.0, 7.5, 3.2, 9.9, 0.4, 5.0, 2.2];
        let rows = nets
            .iter()
            .enumerate()
            .map(|(i, net)| row("Germany", &format!("Issuer{i}"), *net, PositionDate::Unknown))
            .collect();

        match top_shorted(&table(rows), "germany", 5) {
            Answer::TopShorted { country, positions } => {
                assert_eq!(country, "Germany");
                let values: Vec<f64> = positions.iter().map(|p| p.net_short_position).collect();
                assert_eq!(values, vec![9.9, 7.5, 5.0, 3.2, 2.2]);
            }
            other => panic!("Expected TopShorted, got {other:?}"),
        }
    }

    #[test]
    fn test_ties_keep_store_order() {
        let table = table(vec![
            row("France", "Early", 4.0, PositionDate::Unknown),
            row("France", "Late", 4.0, PositionDate::Unknown),
        ]);

        match top_shorted(&table, "france", 5) {
            Answer::TopShorted { positions, .. } => {
                assert_eq!(positions[0].issuer, "Early");
                assert_eq!(positions[1].issuer, "Late");
            }
            other => panic!("Expected TopShorted, got {other:?}"),
        }
    }

    #[test]
    fn test_fewer_than_limit_returns_all() {
        let table = table(vec![
            row("Spain", "A", 1.0, PositionDate::Unknown),
            row("Spain", "B", 2.0, PositionDate::Unknown),
        ]);

        match top_shorted(&table, "spain", 5) {
            Answer::TopShorted { positions, .. } => assert_eq!(positions.len(), 2),
            other => panic!("Expected TopShorted, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_positions_are_not_ranked() {
        let table = table(vec![
            row("Italy", "Broken", f64::NAN, PositionDate::Unknown),
            row("Italy", "StockB", 30.0, PositionDate::Unknown),
            row("Italy", "StockA", 12.5, PositionDate::Unknown),
        ]);

        assert_eq!(
            top_shorted(&table, "italy", 5).to_string(),
            "Most shorted stocks in Italy:\n\
             StockB: 30.0% short position\n\
             StockA: 12.5% short position\n"
        );
    }

    #[test]
    fn test_no_data() {
        let table = table(vec![row("Spain", "A", 1.0, PositionDate::Unknown)]);
        assert_eq!(
            top_shorted(&table, "portugal", 5).to_string(),
            "No data found for Portugal."
        );
    }
}
