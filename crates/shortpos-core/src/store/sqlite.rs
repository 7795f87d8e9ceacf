//! SQLite-backed record store

use rusqlite::{Connection, params};
use std::path::Path;

use super::RecordStore;
use crate::error::Result;
use crate::record::StoredPosition;

const CREATE_SHORT_POSITIONS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS short_positions (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  country TEXT,
  position_holder TEXT,
  issuer TEXT,
  position_date TEXT,
  net_short_position REAL,
  orig_short_position REAL
);
";

const SELECT_ALL_SQL: &str = r"
SELECT country, position_holder, issuer, position_date, net_short_position, orig_short_position
FROM short_positions
ORDER BY id
";

const INSERT_SQL: &str = r"
INSERT INTO short_positions
  (country, position_holder, issuer, position_date, net_short_position, orig_short_position)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

/// Store holding the `short_positions` table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Opening position database: {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (used in tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_SHORT_POSITIONS_SQL)?;
        Ok(Self { conn })
    }

    /// Replace every stored row with `rows` in a single transaction.
    pub fn replace_all(&mut self, rows: &[StoredPosition]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM short_positions", [])?;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for row in rows {
                stmt.execute(params![
                    row.country,
                    row.position_holder,
                    row.issuer,
                    row.position_date,
                    row.net_short_position,
                    row.orig_short_position,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!("Loaded {} position records into database", rows.len());
        Ok(rows.len())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM short_positions", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl RecordStore for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<StoredPosition>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SQL)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredPosition {
                    country: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    position_holder: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    issuer: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    position_date: row.get(3)?,
                    net_short_position: row.get::<_, Option<f64>>(4)?.unwrap_or(f64::NAN),
                    orig_short_position: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Fetched {} position records", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(country: &str, issuer: &str, net: f64) -> StoredPosition {
        StoredPosition {
            country: country.to_string(),
            position_holder: "Citadel".to_string(),
            issuer: issuer.to_string(),
            position_date: Some("2023-05-02".to_string()),
            net_short_position: net,
            orig_short_position: Some(net),
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let rows = vec![
            stored("Italy", "StockA", 12.5),
            stored("Italy", "StockB", 30.0),
            stored("France", "StockC", 0.6),
        ];

        assert_eq!(store.replace_all(&rows).unwrap(), 3);
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.fetch_all().unwrap(), rows);
    }

    #[test]
    fn test_replace_all_discards_previous_rows() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.replace_all(&[stored("Spain", "Old", 1.0)]).unwrap();
        store.replace_all(&[stored("Spain", "New", 2.0)]).unwrap();

        let rows = store.fetch_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].issuer, "New");
    }

    #[test]
    fn test_null_columns_are_tolerated() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO short_positions (country, issuer, net_short_position) VALUES ('Norway', 'Equinor', 0.5)",
                [],
            )
            .unwrap();

        let rows = store.fetch_all().unwrap();
        assert_eq!(rows[0].position_holder, "");
        assert_eq!(rows[0].position_date, None);
        assert_eq!(rows[0].orig_short_position, None);
    }

    #[test]
    fn test_null_net_position_is_not_ranked() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.replace_all(&[stored("Italy", "StockB", 30.0)]).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO short_positions (country, issuer) VALUES ('Italy', 'Broken')",
                [],
            )
            .unwrap();
        assert!(store.fetch_all().unwrap()[1].net_short_position.is_nan());

        let engine = crate::ShortPositionEngine::new(store);
        let answer = engine.answer("most shorted stocks in Italy").unwrap();
        assert_eq!(
            answer.to_string(),
            "Most shorted stocks in Italy:\nStockB: 30.0% short position\n"
        );
    }
}
