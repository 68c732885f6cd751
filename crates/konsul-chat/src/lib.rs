//! Conversation layer: session state, turn orchestration, history mirroring,
//! and uploaded-document ingestion.

pub mod history;
pub mod session;
pub mod turn;
pub mod upload;

pub use history::{HistoryError, HistorySink, JsonlHistory, NullSink};
pub use session::{DEFAULT_TOP_K, GREETING, Session, SessionConfig};
pub use turn::{TurnOutcome, run_turn};
pub use upload::{UploadError, UploadedDoc, read_upload};
