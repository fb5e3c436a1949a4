// src/state.rs
// Shared application state handed to every handler

use std::sync::Arc;
use tracing::warn;

use crate::config::AppConfig;
use crate::llm::{GenerationSettings, ModelHandle};
use crate::persona::Persona;
use crate::session::{MemorySessionStore, SessionKeys, SessionStore};
use crate::sentiment::SentimentMode;

pub struct AppState {
    /// Model behind `/motivational-quotes` (service-default sampling)
    pub quotes_model: ModelHandle,
    /// Model behind `/chat` (tuned sampling)
    pub chat_model: ModelHandle,
    pub sessions: Arc<dyn SessionStore>,
    pub session_keys: SessionKeys,
    pub persona: Persona,
    pub sentiment_mode: SentimentMode,
    pub max_history: usize,
}

impl AppState {
    /// Builds both model handles once. A missing credential leaves them
    /// `Unavailable` rather than failing startup.
    pub fn from_config(config: &AppConfig) -> Self {
        let api_key = config.gemini_api_key.as_deref();
        let quotes_model = ModelHandle::gemini(
            api_key,
            &config.gemini_base_url,
            &config.gemini_model,
            GenerationSettings::default(),
        );
        let chat_model = ModelHandle::gemini(
            api_key,
            &config.gemini_base_url,
            &config.gemini_model,
            config.chat_generation(),
        );

        let session_keys = match &config.session_secret {
            Some(secret) => SessionKeys::new(secret),
            None => {
                warn!("SESSION_SECRET not set; using a random per-process secret");
                SessionKeys::random()
            }
        };

        Self {
            quotes_model,
            chat_model,
            sessions: Arc::new(MemorySessionStore::with_limits(
                config.session_idle_ttl(),
                config.session_max_entries,
            )),
            session_keys,
            persona: Persona::default(),
            sentiment_mode: config.chat_sentiment_mode,
            max_history: config.chat_max_history,
        }
    }
}
