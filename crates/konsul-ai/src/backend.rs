//! HTTP transports for the supported provider APIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::provider::{ModelCandidate, Provider};
use crate::reply::RawReply;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("api returned no completion")]
    EmptyReply,
}

/// One completion request: the composed system prompt plus the user's message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_message: String,
}

/// A completion transport the pipeline can call.
///
/// This is the seam between the fallback walk and the network: the pipeline
/// only ever calls `complete` once per candidate, and tests script outcomes
/// against it without any HTTP.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        candidate: &ModelCandidate,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, BackendError>;
}

/// Real transport over the provider REST APIs.
pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a client with the transport timeouts the turn model relies on:
    /// 15 s to connect, 120 s for the whole request. There is no cancellation
    /// beyond these.
    pub fn new() -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { client })
    }

    async fn complete_google(
        &self,
        candidate: &ModelCandidate,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, BackendError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": request.system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.user_message }] }],
        });

        let url = candidate.provider.endpoint(&candidate.model);
        debug!(model = %candidate, "sending generateContent request");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let resp = require_success(resp).await?;

        let decoded: GoogleResponse = resp.json().await?;
        let first = decoded
            .candidates
            .into_iter()
            .next()
            .ok_or(BackendError::EmptyReply)?;
        if first.content.parts.is_null() {
            return Err(BackendError::EmptyReply);
        }
        Ok(RawReply::from_value(first.content.parts))
    }

    async fn complete_openai(
        &self,
        candidate: &ModelCandidate,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, BackendError> {
        let body = json!({
            "model": candidate.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message },
            ],
        });

        let url = candidate.provider.endpoint(&candidate.model);
        debug!(model = %candidate, "sending chat completion request");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let resp = require_success(resp).await?;

        let decoded: OpenAiResponse = resp.json().await?;
        let first = decoded
            .choices
            .into_iter()
            .next()
            .ok_or(BackendError::EmptyReply)?;
        if first.message.content.is_null() {
            return Err(BackendError::EmptyReply);
        }
        Ok(RawReply::from_value(first.message.content))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn complete(
        &self,
        candidate: &ModelCandidate,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, BackendError> {
        match candidate.provider {
            Provider::Google => self.complete_google(candidate, api_key, request).await,
            Provider::OpenAI => self.complete_openai(candidate, api_key, request).await,
        }
    }
}

async fn require_success(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Api {
        status: status.as_u16(),
        body,
    })
}

// Wire shapes. Reply content is left as raw JSON and handed to
// `RawReply::from_value`; only the envelope is typed.

#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

#[derive(Deserialize)]
struct GoogleContent {
    #[serde(default)]
    parts: serde_json::Value,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: serde_json::Value,
}
