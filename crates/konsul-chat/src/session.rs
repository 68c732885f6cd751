//! Per-conversation state.

use konsul_ai::context::DEFAULT_UPLOAD_CAP;
use konsul_core::{ChatTurn, RegulationRecord, SearchQuery};
use konsul_store::RegulationStore;
use tracing::warn;

use crate::history::HistorySink;
use crate::upload::UploadedDoc;

/// Assistant turn every session starts with.
pub const GREETING: &str = "Halo! Silakan upload dokumen atau tanya tentang aturan.";

/// Default number of records a search may feed into the context.
pub const DEFAULT_TOP_K: usize = 15;

/// Knobs fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub top_k: usize,
    pub upload_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            upload_cap: DEFAULT_UPLOAD_CAP,
        }
    }
}

/// All state for one conversation.
///
/// Created at session start, borrowed mutably by each turn, dropped at the
/// end — nothing conversational lives in globals. The record store is shared
/// read-only; the history is append-only with this session as sole writer.
pub struct Session {
    store: RegulationStore,
    history: Vec<ChatTurn>,
    sink: Box<dyn HistorySink>,
    uploaded: Option<UploadedDoc>,
    config: SessionConfig,
}

impl Session {
    /// Start a session over a loaded store, seeded with the greeting.
    pub fn new(store: RegulationStore, sink: Box<dyn HistorySink>, config: SessionConfig) -> Self {
        let mut session = Self {
            store,
            history: Vec::new(),
            sink,
            uploaded: None,
            config,
        };
        session.append_turn(ChatTurn::assistant(GREETING.to_string()));
        session
    }

    /// Append a turn and mirror it. A sink failure is logged, never fatal:
    /// the in-memory history is the source of truth.
    pub(crate) fn append_turn(&mut self, turn: ChatTurn) {
        if let Err(err) = self.sink.append(&turn) {
            warn!(error = %err, "history mirror append failed");
        }
        self.history.push(turn);
    }

    /// Search the store with this session's `top_k`.
    pub fn search(&self, query: &SearchQuery) -> Vec<RegulationRecord> {
        self.store.search(query, self.config.top_k)
    }

    pub fn attach_upload(&mut self, doc: UploadedDoc) {
        self.uploaded = Some(doc);
    }

    pub fn clear_upload(&mut self) {
        self.uploaded = None;
    }

    pub fn uploaded(&self) -> Option<&UploadedDoc> {
        self.uploaded.as_ref()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn store(&self) -> &RegulationStore {
        &self.store
    }

    pub fn upload_cap(&self) -> usize {
        self.config.upload_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryError, NullSink};
    use konsul_core::ChatRole;
    use std::sync::{Arc, Mutex};

    struct RecordingSink {
        seen: Arc<Mutex<Vec<ChatTurn>>>,
    }

    impl HistorySink for RecordingSink {
        fn append(&mut self, turn: &ChatTurn) -> Result<(), HistoryError> {
            self.seen.lock().unwrap().push(turn.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl HistorySink for FailingSink {
        fn append(&mut self, _turn: &ChatTurn) -> Result<(), HistoryError> {
            Err(HistoryError::Io(std::io::Error::other("disk full")))
        }
    }

    fn store() -> RegulationStore {
        RegulationStore::from_records(vec![konsul_core::RegulationRecord::new(
            "PMK-01".into(),
            "Uang Makan".into(),
            "PMK".into(),
            None,
            "".into(),
        )])
    }

    #[test]
    fn session_starts_with_greeting() {
        let session = Session::new(store(), Box::new(NullSink), SessionConfig::default());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, ChatRole::Assistant);
        assert_eq!(session.history()[0].content, GREETING);
    }

    #[test]
    fn appended_turns_are_mirrored() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink {
            seen: Arc::clone(&seen),
        };
        let mut session = Session::new(store(), Box::new(sink), SessionConfig::default());
        session.append_turn(ChatTurn::user("halo".into()));

        let mirrored = seen.lock().unwrap();
        assert_eq!(mirrored.len(), 2); // greeting + user turn
        assert_eq!(mirrored[1].content, "halo");
    }

    #[test]
    fn sink_failure_keeps_in_memory_history() {
        let mut session = Session::new(store(), Box::new(FailingSink), SessionConfig::default());
        session.append_turn(ChatTurn::user("tetap tercatat".into()));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].content, "tetap tercatat");
    }

    #[test]
    fn upload_attach_and_clear() {
        let mut session = Session::new(store(), Box::new(NullSink), SessionConfig::default());
        assert!(session.uploaded().is_none());

        session.attach_upload(UploadedDoc {
            name: "surat.txt".into(),
            text: "isi".into(),
        });
        assert_eq!(session.uploaded().unwrap().name, "surat.txt");

        session.clear_upload();
        assert!(session.uploaded().is_none());
    }

    #[test]
    fn search_respects_session_top_k() {
        let records = (0..20)
            .map(|i| {
                konsul_core::RegulationRecord::new(
                    format!("PMK-{i:02}"),
                    "Uang Makan".into(),
                    "PMK".into(),
                    None,
                    "".into(),
                )
            })
            .collect();
        let session = Session::new(
            RegulationStore::from_records(records),
            Box::new(NullSink),
            SessionConfig {
                top_k: 5,
                ..SessionConfig::default()
            },
        );
        let hits = session.search(&SearchQuery::parse("uang makan"));
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[0].nomor, "PMK-00");
    }
}
