// src/llm/gemini.rs
//! Gemini `generateContent` client.
//!
//! One POST per completion. History turns go out as `user` / `model`
//! contents followed by the new prompt as a final `user` turn.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CompletionClient, CompletionError, GenerationSettings};
use crate::session::history::{ChatMessage, Role};

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    settings: GenerationSettings,
}

impl GeminiClient {
    /// Builds the HTTP client. No request timeout is set; reqwest defaults apply.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        settings: GenerationSettings,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, request: &GeminiRequest) -> Result<String, CompletionError> {
        debug!(
            "Gemini request: model={}, turns={}",
            self.model,
            request.contents.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}", status);
            return Err(CompletionError::Api { status, body });
        }

        let api_response: GeminiResponse = response.json().await?;
        extract_text(api_response)
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize, Debug)]
pub(crate) struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationSettings>,
}

#[derive(Serialize, Debug)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Debug)]
struct GeminiTextPart {
    text: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Deserialize, Debug)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize, Debug)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiError {
    message: String,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

pub(crate) fn build_request(
    history: &[ChatMessage],
    prompt: &str,
    settings: GenerationSettings,
) -> GeminiRequest {
    let mut contents: Vec<GeminiContent> = history
        .iter()
        .map(|msg| GeminiContent {
            role: role_name(msg.role),
            parts: msg
                .parts
                .iter()
                .map(|text| GeminiTextPart { text: text.clone() })
                .collect(),
        })
        .collect();

    contents.push(GeminiContent {
        role: "user",
        parts: vec![GeminiTextPart {
            text: prompt.to_string(),
        }],
    });

    GeminiRequest {
        contents,
        generation_config: (!settings.is_default()).then_some(settings),
    }
}

/// Text of the first candidate, trimmed. Blank text is [`CompletionError::Empty`].
pub(crate) fn extract_text(response: GeminiResponse) -> Result<String, CompletionError> {
    if let Some(error) = response.error {
        return Err(CompletionError::Service(error.message));
    }
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(CompletionError::Blocked(reason));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = build_request(&[], prompt, self.settings);
        self.generate(&request).await
    }

    async fn continue_conversation(
        &self,
        history: &[ChatMessage],
        prompt: &str,
    ) -> Result<String, CompletionError> {
        let request = build_request(history, prompt, self.settings);
        self.generate(&request).await
    }
}
