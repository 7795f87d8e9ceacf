use super::RecordStore;
use crate::error::Result;
use crate::record::StoredPosition;

/// In-process store backed by a vector
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<StoredPosition>,
}

impl MemoryStore {
    pub fn new(rows: Vec<StoredPosition>) -> Self {
        Self { rows }
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<StoredPosition>> {
        Ok(self.rows.clone())
    }
}

impl FromIterator<StoredPosition> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = StoredPosition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
