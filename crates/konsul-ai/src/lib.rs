//! Model invocation: providers, wire backends, reply normalisation, and the
//! sequential fallback pipeline.

pub mod backend;
pub mod context;
pub mod pipeline;
pub mod provider;
pub mod reply;

pub use backend::{BackendError, ChatBackend, ChatRequest, HttpBackend};
pub use pipeline::{ModelPipeline, PipelineError, PipelineReply};
pub use provider::{ModelCandidate, Provider, default_ladder, openai_ladder};
pub use reply::{RawReply, ReplyPart};
