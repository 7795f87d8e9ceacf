//! Intent extraction for free-text questions
//!
//! Queries are matched against an ordered rule table. Each rule carries the
//! marker phrases that trigger it and a builder that pulls the country names
//! out of the query. The first rule whose marker appears wins; a query that
//! triggers nothing is [`Intent::Unrecognized`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TREND_COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)trend in ([a-zA-Z ]+)").expect("valid trend pattern"));

static IN_COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin ([a-zA-Z ]+)").expect("valid country pattern"));

static HOW_DOES_COMPARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)how does (.+?) compare to (.+)").expect("valid comparison pattern")
});

static COMPARE_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)compare (.+?) and (.+)").expect("valid sectoral pattern"));

/// The analytic operation a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Trend,
    Timeliness,
    Comparison,
    SectoralInsight,
    TopShorted,
}

impl IntentKind {
    /// Whether the operation needs two countries
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Comparison | Self::SectoralInsight)
    }
}

/// Classified query. Country names are trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Trend { country: String },
    Timeliness { country: String },
    /// "how does X compare to Y"
    Comparison { first: String, second: String },
    /// "compare X and Y"
    SectoralInsight { first: String, second: String },
    TopShorted { country: String },
    /// A marker matched but no country text could be captured
    MissingEntity(IntentKind),
    Unrecognized,
}

impl Intent {
    pub fn kind(&self) -> Option<IntentKind> {
        match self {
            Self::Trend { .. } => Some(IntentKind::Trend),
            Self::Timeliness { .. } => Some(IntentKind::Timeliness),
            Self::Comparison { .. } => Some(IntentKind::Comparison),
            Self::SectoralInsight { .. } => Some(IntentKind::SectoralInsight),
            Self::TopShorted { .. } => Some(IntentKind::TopShorted),
            Self::MissingEntity(kind) => Some(*kind),
            Self::Unrecognized => None,
        }
    }
}

/// One entry of the priority-ordered rule table
struct Rule {
    markers: &'static [&'static str],
    build: fn(&str) -> Intent,
}

const RULES: &[Rule] = &[
    Rule {
        markers: &["trend in"],
        build: build_trend,
    },
    Rule {
        markers: &["compare", "how does"],
        build: build_pair,
    },
    Rule {
        markers: &["timeliness"],
        build: build_timeliness,
    },
    Rule {
        markers: &["most shorted stocks", "shorted stocks"],
        build: build_top_shorted,
    },
];

fn build_trend(query: &str) -> Intent {
    match capture_country(&TREND_COUNTRY, query) {
        Some(country) => Intent::Trend { country },
        None => Intent::MissingEntity(IntentKind::Trend),
    }
}

fn build_timeliness(query: &str) -> Intent {
    match capture_country(&IN_COUNTRY, query) {
        Some(country) => Intent::Timeliness { country },
        None => Intent::MissingEntity(IntentKind::Timeliness),
    }
}

fn build_top_shorted(query: &str) -> Intent {
    match capture_country(&IN_COUNTRY, query) {
        Some(country) => Intent::TopShorted { country },
        None => Intent::MissingEntity(IntentKind::TopShorted),
    }
}

fn build_pair(query: &str) -> Intent {
    if let Some((first, second)) = capture_pair(&HOW_DOES_COMPARE, query) {
        return Intent::Comparison { first, second };
    }
    if let Some((first, second)) = capture_pair(&COMPARE_AND, query) {
        return Intent::SectoralInsight { first, second };
    }
    if query.to_lowercase().contains("how does") {
        Intent::MissingEntity(IntentKind::Comparison)
    } else {
        Intent::MissingEntity(IntentKind::SectoralInsight)
    }
}

fn capture_country(pattern: &Regex, query: &str) -> Option<String> {
    pattern
        .captures(query)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean_entity(m.as_str()))
}

fn capture_pair(pattern: &Regex, query: &str) -> Option<(String, String)> {
    let caps = pattern.captures(query)?;
    let first = clean_entity(caps.get(1)?.as_str())?;
    let second = clean_entity(caps.get(2)?.as_str())?;
    Some((first, second))
}

/// Trim whitespace and trailing sentence punctuation, then lower-case.
fn clean_entity(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_end_matches(['?', '.', '!', ',', ';', ':'])
        .trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_lowercase())
    }
}

/// Rule-based router from free text to [`Intent`]
#[derive(Debug, Clone, Default)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query. Always returns a variant.
    pub fn classify(&self, query: &str) -> Intent {
        let query_lower = query.to_lowercase();

        let intent = RULES
            .iter()
            .find(|rule| Self::matches_any(&query_lower, rule.markers))
            .map_or(Intent::Unrecognized, |rule| (rule.build)(query));

        tracing::debug!("Classified query {:?} as {:?}", query, intent);
        intent
    }

    /// Check if query contains any of the markers
    fn matches_any(query: &str, markers: &[&str]) -> bool {
        markers.iter().any(|marker| query.contains(marker))
    }
}
