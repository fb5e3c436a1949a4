// src/llm/mod.rs
// Completion client abstraction and the startup-time model handle

pub mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::session::history::ChatMessage;

pub use gemini::GeminiClient;

/// Errors from a single completion round-trip
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("model returned an empty completion")]
    Empty,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Gemini error: {0}")]
    Service(String),

    #[error("prompt blocked: {0}")]
    Blocked(String),
}

/// Sampling parameters. `None` fields are left to the service defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationSettings {
    pub fn is_default(&self) -> bool {
        *self == GenerationSettings::default()
    }
}

/// Prompt in, text out.
///
/// Implementations return trimmed, non-empty text or a [`CompletionError`].
/// There are no retries: one failed call is one failed request.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logging and health output
    fn model(&self) -> &str;

    /// Single-turn completion
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Re-sends `history` ahead of `prompt`. The service keeps no state
    /// between calls, so the whole (trimmed) history goes out every time.
    async fn continue_conversation(
        &self,
        history: &[ChatMessage],
        prompt: &str,
    ) -> Result<String, CompletionError>;
}

/// Outcome of building a model client once at startup.
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn CompletionClient>),
    Unavailable(String),
}

impl ModelHandle {
    /// Builds a Gemini-backed handle, or records why it cannot be built.
    pub fn gemini(
        api_key: Option<&str>,
        base_url: &str,
        model: &str,
        settings: GenerationSettings,
    ) -> Self {
        let Some(api_key) = api_key else {
            return ModelHandle::Unavailable("GEMINI_API_KEY not set".to_string());
        };
        match GeminiClient::new(api_key, base_url, model, settings) {
            Ok(client) => ModelHandle::Ready(Arc::new(client)),
            Err(e) => ModelHandle::Unavailable(format!("failed to build Gemini client: {e}")),
        }
    }

    pub fn client(&self) -> Result<&Arc<dyn CompletionClient>, &str> {
        match self {
            ModelHandle::Ready(client) => Ok(client),
            ModelHandle::Unavailable(reason) => Err(reason.as_str()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelHandle::Ready(_))
    }

    pub fn model_name(&self) -> Option<&str> {
        self.client().ok().map(|client| client.model())
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Ready(client) => write!(f, "Ready({})", client.model()),
            ModelHandle::Unavailable(reason) => write!(f, "Unavailable({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_marks_handle_unavailable() {
        let handle = ModelHandle::gemini(
            None,
            "http://localhost:1",
            "gemini-2.0-flash",
            GenerationSettings::default(),
        );
        assert!(!handle.is_available());
        assert_eq!(handle.client().err(), Some("GEMINI_API_KEY not set"));
        assert_eq!(handle.model_name(), None);
    }

    #[test]
    fn test_key_present_builds_ready_handle() {
        let handle = ModelHandle::gemini(
            Some("test-key"),
            "http://localhost:1",
            "gemini-2.0-flash",
            GenerationSettings::default(),
        );
        assert!(handle.is_available());
        assert_eq!(handle.model_name(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_default_settings_serialize_empty() {
        let settings = GenerationSettings::default();
        assert!(settings.is_default());
        assert_eq!(serde_json::to_value(settings).unwrap(), serde_json::json!({}));
    }
}
