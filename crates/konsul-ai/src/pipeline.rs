//! Sequential model fallback over an ordered candidate ladder.

use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{ChatBackend, ChatRequest};
use crate::provider::ModelCandidate;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No API key configured; nothing was attempted.
    #[error("no API key configured")]
    MissingCredential,
    /// Every candidate failed. The last failure is kept verbatim.
    #[error("all {attempts} model attempt(s) failed, last error: {last_error}")]
    Exhausted { attempts: usize, last_error: String },
}

/// The normalised answer plus the candidate that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReply {
    pub answer: String,
    pub candidate: ModelCandidate,
}

/// Walks the candidate ladder front to back, one attempt per candidate.
///
/// The walk is strictly sequential: later candidates only run after earlier
/// ones fail, and at most one candidate ever succeeds per request. There is
/// no retry and no reordering.
pub struct ModelPipeline {
    backend: Box<dyn ChatBackend>,
    candidates: Vec<ModelCandidate>,
    api_key: String,
}

impl ModelPipeline {
    pub fn new(
        backend: Box<dyn ChatBackend>,
        candidates: Vec<ModelCandidate>,
        api_key: String,
    ) -> Self {
        Self {
            backend,
            candidates,
            api_key,
        }
    }

    pub fn candidates(&self) -> &[ModelCandidate] {
        &self.candidates
    }

    /// Run the ladder for one request.
    ///
    /// `notify` fires before each attempt so a front-end can show which model
    /// is currently thinking; it is advisory only. A missing key fails before
    /// any attempt — that is a configuration problem, not a model failure.
    pub async fn run(
        &self,
        request: &ChatRequest,
        mut notify: impl FnMut(&ModelCandidate),
    ) -> Result<PipelineReply, PipelineError> {
        if self.api_key.trim().is_empty() {
            return Err(PipelineError::MissingCredential);
        }

        let mut last_error = None;
        for candidate in &self.candidates {
            notify(candidate);
            match self
                .backend
                .complete(candidate, &self.api_key, request)
                .await
            {
                Ok(reply) => {
                    info!(model = %candidate, "model answered");
                    return Ok(PipelineReply {
                        answer: reply.normalize(),
                        candidate: candidate.clone(),
                    });
                }
                Err(err) => {
                    warn!(model = %candidate, error = %err, "model attempt failed, trying next");
                    last_error = Some(err.to_string());
                }
            }
        }

        Err(PipelineError::Exhausted {
            attempts: self.candidates.len(),
            last_error: last_error.unwrap_or_else(|| "no models configured".to_string()),
        })
    }
}
