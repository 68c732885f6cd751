//! One question-answer turn: search, compose, invoke, record.

use konsul_ai::backend::ChatRequest;
use konsul_ai::context::{build_system_prompt, compose_regulation_context, compose_upload_context};
use konsul_ai::{ModelCandidate, ModelPipeline, PipelineError};
use konsul_core::{ChatTurn, RegulationRecord, SearchQuery};

use crate::session::Session;

/// Everything a successful turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Normalised answer text.
    pub answer: String,
    /// Records that matched the query, for the reference table.
    pub references: Vec<RegulationRecord>,
    /// The candidate that answered.
    pub candidate: ModelCandidate,
}

/// Run one turn against the session's store and the given pipeline.
///
/// The user turn is appended (and mirrored) before invocation — the question
/// was asked whether or not any model answers. The assistant turn is appended
/// only on success, so a failed turn leaves no placeholder in history.
pub async fn run_turn(
    session: &mut Session,
    pipeline: &ModelPipeline,
    raw_query: &str,
    notify: impl FnMut(&ModelCandidate),
) -> Result<TurnOutcome, PipelineError> {
    session.append_turn(ChatTurn::user(raw_query.to_string()));

    let query = SearchQuery::parse(raw_query);
    let references = session.search(&query);
    let db_context = compose_regulation_context(&references);
    let upload_context = session
        .uploaded()
        .map(|doc| compose_upload_context(&doc.text, session.upload_cap()))
        .unwrap_or_default();

    let request = ChatRequest {
        system_prompt: build_system_prompt(&db_context, &upload_context),
        user_message: raw_query.to_string(),
    };

    let reply = pipeline.run(&request, notify).await?;
    session.append_turn(ChatTurn::assistant(reply.answer.clone()));

    Ok(TurnOutcome {
        answer: reply.answer,
        references,
        candidate: reply.candidate,
    })
}
