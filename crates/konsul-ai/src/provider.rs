//! Providers and the ordered model ladder the pipeline walks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An LLM API vendor.
///
/// Always chosen explicitly — nothing here infers a provider from a model
/// name or from which environment variables happen to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    OpenAI,
}

impl Provider {
    /// Completion endpoint for the given model.
    ///
    /// Google scopes the model in the URL; OpenAI takes it in the body.
    pub fn endpoint(&self, model: &str) -> String {
        match self {
            Provider::Google => format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            ),
            Provider::OpenAI => "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::OpenAI => "openai",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(Provider::Google),
            "openai" => Ok(Provider::OpenAI),
            other => Err(format!("unknown provider: {other} (expected google or openai)")),
        }
    }
}

/// One (provider, model) attempt in the fallback ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCandidate {
    pub provider: Provider,
    pub model: String,
}

impl ModelCandidate {
    pub fn google(model: &str) -> Self {
        Self {
            provider: Provider::Google,
            model: model.to_string(),
        }
    }

    pub fn openai(model: &str) -> Self {
        Self {
            provider: Provider::OpenAI,
            model: model.to_string(),
        }
    }
}

impl fmt::Display for ModelCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider.as_str(), self.model)
    }
}

/// Default Google ladder: current flash first, then the older names that
/// remain reachable on free-tier keys.
pub fn default_ladder() -> Vec<ModelCandidate> {
    vec![
        ModelCandidate::google("gemini-2.0-flash"),
        ModelCandidate::google("gemini-flash-latest"),
        ModelCandidate::google("gemini-pro"),
    ]
}

/// Single-candidate ladder for OpenAI keys.
pub fn openai_ladder() -> Vec<ModelCandidate> {
    vec![ModelCandidate::openai("gpt-4o")]
}
