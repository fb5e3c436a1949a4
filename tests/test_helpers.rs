// tests/test_helpers.rs
// Shared fixtures for router tests: scripted model, failing store, request helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use moodlift::api::create_router;
use moodlift::llm::{CompletionClient, CompletionError, ModelHandle};
use moodlift::persona::Persona;
use moodlift::sentiment::SentimentMode;
use moodlift::session::history::ChatMessage;
use moodlift::session::{
    MemorySessionStore, SessionData, SessionError, SessionKeys, SessionStore,
};
use moodlift::state::AppState;

pub const TEST_SECRET: &str = "test-secret";
pub const DEFAULT_REPLY: &str = "I'm right here with you.";

/// Completion client that plays back queued results and records every call.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: AtomicUsize,
    history_lens: Mutex<Vec<usize>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies(replies: Vec<Result<String, CompletionError>>) -> Arc<Self> {
        let client = Self::default();
        *client.replies.lock().unwrap() = replies.into();
        Arc::new(client)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// History length seen by each `continue_conversation` call
    pub fn history_lens(&self) -> Vec<usize> {
        self.history_lens.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_reply(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.next_reply(prompt)
    }

    async fn continue_conversation(
        &self,
        history: &[ChatMessage],
        prompt: &str,
    ) -> Result<String, CompletionError> {
        self.history_lens.lock().unwrap().push(history.len());
        self.next_reply(prompt)
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn get(&self, _session_id: &str) -> Result<Option<SessionData>, SessionError> {
        Err(SessionError::Store("store offline".to_string()))
    }

    async fn set(&self, _session_id: &str, _data: SessionData) -> Result<(), SessionError> {
        Err(SessionError::Store("store offline".to_string()))
    }

    async fn delete(&self, _session_id: &str) -> Result<(), SessionError> {
        Err(SessionError::Store("store offline".to_string()))
    }
}

pub fn ready(client: &Arc<ScriptedClient>) -> ModelHandle {
    ModelHandle::Ready(client.clone())
}

pub fn unavailable() -> ModelHandle {
    ModelHandle::Unavailable("GEMINI_API_KEY not set".to_string())
}

pub fn build_state(
    quotes_model: ModelHandle,
    chat_model: ModelHandle,
    sessions: Arc<dyn SessionStore>,
    max_history: usize,
) -> Arc<AppState> {
    Arc::new(AppState {
        quotes_model,
        chat_model,
        sessions,
        session_keys: SessionKeys::new(TEST_SECRET),
        persona: Persona::Alex,
        sentiment_mode: SentimentMode::Graded,
        max_history,
    })
}

/// Router with both models backed by `client` and an in-memory store.
pub fn create_test_app(client: &Arc<ScriptedClient>, max_history: usize) -> Router {
    let state = build_state(
        ready(client),
        ready(client),
        Arc::new(MemorySessionStore::new()),
        max_history,
    );
    create_router(state, &[])
}

pub fn post_json(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, headers, json)
}

/// `name=value` pair from a `Set-Cookie` header, ready to send back.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}
