//! Record stores the engine reads position snapshots from

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::record::StoredPosition;

/// Read access to the full set of position records.
///
/// `fetch_all` returns an owned snapshot in the store's natural order, which
/// must be stable between calls so tie-breaks are reproducible.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    fn fetch_all(&self) -> Result<Vec<StoredPosition>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn fetch_all(&self) -> Result<Vec<StoredPosition>> {
        (**self).fetch_all()
    }
}
