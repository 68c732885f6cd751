//! Regulation store: CSV ingestion and keyword search over the in-memory table.

mod error;
pub use error::StoreError;

mod table;
pub use table::RegulationStore;

mod search;
pub use search::{MatchMode, search};
