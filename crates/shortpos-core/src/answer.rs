//! Structured answers and their prose rendering

use serde::Serialize;
use std::fmt;

use crate::record::PositionDate;
use crate::router::IntentKind;

/// Fixed reply for queries no rule recognizes
pub const UNRECOGNIZED_REPLY: &str = "I'm sorry, I didn't understand that. Please try again.";

/// An issuer and its net short position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuerPosition {
    pub issuer: String,
    pub net_short_position: f64,
}

/// One row of a trend answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub position_date: PositionDate,
    pub net_short_position: f64,
}

/// One side of a comparison; `top` is `None` when the country has no rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySide {
    pub country: String,
    pub top: Option<IssuerPosition>,
}

/// Answer to a single query. Country names are title-cased for display.
///
/// `Display` renders the human-readable reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    TopShorted {
        country: String,
        positions: Vec<IssuerPosition>,
    },
    Trend {
        country: String,
        points: Vec<TrendPoint>,
    },
    Timeliness {
        country: String,
        average_days: f64,
    },
    Comparison {
        first: CountrySide,
        second: CountrySide,
    },
    SectoralInsight {
        first: CountrySide,
        second: CountrySide,
    },
    NoData {
        country: String,
    },
    NoValidDates {
        country: String,
    },
    InsufficientData {
        country: String,
        window: usize,
    },
    MissingEntity {
        intent: IntentKind,
    },
    Unrecognized,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopShorted { country, positions } => {
                writeln!(f, "Most shorted stocks in {country}:")?;
                for position in positions {
                    writeln!(
                        f,
                        "{}: {}% short position",
                        position.issuer,
                        format_percent(position.net_short_position)
                    )?;
                }
                Ok(())
            }
            Self::Trend { country, points } => {
                writeln!(f, "Trend of short positions in {country}:")?;
                for point in points {
                    writeln!(
                        f,
                        "{}: {}% short position",
                        point.position_date,
                        format_percent(point.net_short_position)
                    )?;
                }
                Ok(())
            }
            Self::Timeliness {
                country,
                average_days,
            } => write!(
                f,
                "Short positions in {country} are reported on average {average_days:.2} days ago."
            ),
            Self::Comparison { first, second } => {
                writeln!(
                    f,
                    "Comparing short positions between {} and {}:",
                    first.country, second.country
                )?;
                for side in [first, second] {
                    match &side.top {
                        Some(top) => writeln!(
                            f,
                            "{} - {}: {}% short position",
                            side.country,
                            top.issuer,
                            format_percent(top.net_short_position)
                        )?,
                        None => writeln!(f, "{} has no short positions recorded.", side.country)?,
                    }
                }
                Ok(())
            }
            Self::SectoralInsight { first, second } => {
                writeln!(f, "Sectoral Insights:")?;
                for side in [first, second] {
                    if let Some(top) = &side.top {
                        writeln!(
                            f,
                            "{}: {} with {}% short position",
                            side.country,
                            top.issuer,
                            format_percent(top.net_short_position)
                        )?;
                    }
                }
                Ok(())
            }
            Self::NoData { country } => write!(f, "No data found for {country}."),
            Self::NoValidDates { country } => {
                write!(f, "No valid position dates found for {country}.")
            }
            Self::InsufficientData { country, window } => {
                write!(f, "Insufficient data for the last {window} records in {country}.")
            }
            Self::MissingEntity { intent } if intent.is_pair() => {
                f.write_str("Please specify the countries to compare.")
            }
            Self::MissingEntity { .. } => f.write_str("Could not extract country from query."),
            Self::Unrecognized => f.write_str(UNRECOGNIZED_REPLY),
        }
    }
}

/// Render a percentage the way a Python float prints: `30.0`, `12.5`.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Title-case a name: letters after a non-letter are upper-cased, the rest lower-cased.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_is_letter = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(issuer: &str, net: f64) -> IssuerPosition {
        IssuerPosition {
            issuer: issuer.to_string(),
            net_short_position: net,
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(30.0), "30.0");
        assert_eq!(format_percent(12.5), "12.5");
        assert_eq!(format_percent(0.0), "0.0");
        assert_eq!(format_percent(0.73), "0.73");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("italy"), "Italy");
        assert_eq!(title_case("united kingdom"), "United Kingdom");
        assert_eq!(title_case("uk"), "Uk");
        assert_eq!(title_case("bosnia-herzegovina"), "Bosnia-Herzegovina");
    }

    #[test]
    fn test_comparison_rendering_with_missing_side() {
        let answer = Answer::Comparison {
            first: CountrySide {
                country: "Sweden".to_string(),
                top: Some(position("Volvo", 2.1)),
            },
            second: CountrySide {
                country: "Norway".to_string(),
                top: None,
            },
        };

        assert_eq!(
            answer.to_string(),
            "Comparing short positions between Sweden and Norway:\n\
             Sweden - Volvo: 2.1% short position\n\
             Norway has no short positions recorded.\n"
        );
    }

    #[test]
    fn test_missing_entity_messages() {
        let single = Answer::MissingEntity {
            intent: IntentKind::Timeliness,
        };
        let pair = Answer::MissingEntity {
            intent: IntentKind::SectoralInsight,
        };

        assert_eq!(single.to_string(), "Could not extract country from query.");
        assert_eq!(pair.to_string(), "Please specify the countries to compare.");
        assert_ne!(
            single.to_string(),
            Answer::NoData {
                country: "France".to_string()
            }
            .to_string()
        );
    }

    #[test]
    fn test_insufficient_data_names_window() {
        let answer = Answer::InsufficientData {
            country: "Austria".to_string(),
            window: 3,
        };
        assert_eq!(
            answer.to_string(),
            "Insufficient data for the last 3 records in Austria."
        );
    }

    #[test]
    fn test_json_shape() {
        let answer = Answer::TopShorted {
            country: "Italy".to_string(),
            positions: vec![position("StockB", 30.0)],
        };

        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["kind"], "top_shorted");
        assert_eq!(value["positions"][0]["issuer"], "StockB");
        assert_eq!(
            serde_json::to_value(Answer::Unrecognized).unwrap()["kind"],
            "unrecognized"
        );
    }
}
