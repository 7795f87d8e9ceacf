//! Query dispatcher: store snapshot → date normalization → intent → operation

use chrono::{Local, NaiveDateTime};

use crate::analytics;
use crate::answer::Answer;
use crate::config::AnalyticsConfig;
use crate::dates;
use crate::error::Result;
use crate::record::PositionTable;
use crate::router::{Intent, IntentRouter};
use crate::store::RecordStore;

/// Answers free-text questions against a record store.
///
/// Every call re-reads and re-normalizes the full table; nothing is cached
/// between queries.
pub struct ShortPositionEngine<S> {
    store: S,
    router: IntentRouter,
    config: AnalyticsConfig,
}

impl<S: RecordStore> ShortPositionEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            router: IntentRouter::new(),
            config: AnalyticsConfig::default(),
        }
    }

    /// Create an engine with custom limits; the config is validated first.
    pub fn with_config(store: S, config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            router: IntentRouter::new(),
            config,
        })
    }

    /// Answer a query using the local wall clock for timeliness.
    pub fn answer(&self, query: &str) -> Result<Answer> {
        self.answer_at(query, Local::now().naive_local())
    }

    /// Answer a query as of `now`.
    ///
    /// Only a failing store read produces an `Err`.
    pub fn answer_at(&self, query: &str, now: NaiveDateTime) -> Result<Answer> {
        tracing::info!("Processing query: {}", query);

        let table = dates::normalize(self.store.fetch_all()?);
        let intent = self.router.classify(query);
        Ok(self.dispatch(&intent, &table, now))
    }

    /// Route a classified intent to its analytic operation.
    pub fn dispatch(&self, intent: &Intent, table: &PositionTable, now: NaiveDateTime) -> Answer {
        match intent {
            Intent::Trend { country } => analytics::trend(table, country, self.config.trend_window),
            Intent::Timeliness { country } => analytics::timeliness(table, country, now),
            Intent::Comparison { first, second } => analytics::comparison(table, first, second),
            Intent::SectoralInsight { first, second } => {
                analytics::sectoral_insight(table, first, second)
            }
            Intent::TopShorted { country } => {
                analytics::top_shorted(table, country, self.config.top_shorted_limit)
            }
            Intent::MissingEntity(kind) => {
                tracing::info!("No country found in query for {:?}", kind);
                Answer::MissingEntity { intent: *kind }
            }
            Intent::Unrecognized => Answer::Unrecognized,
        }
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
