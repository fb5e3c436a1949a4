// src/api/http/chat.rs

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::session::SessionContext;
use crate::api::error::{ApiError, ApiResult, ErrorKind};
use crate::api::validation::parse_chat_message;
use crate::prompt::build_chat_prompt;
use crate::sentiment::analyze;
use crate::session::history::Role;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub sentiment_detected: &'static str,
    pub timestamp: String,
}

/// POST /chat
///
/// Logs the sentiment category and message length only; message and reply
/// text never reach the logs.
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session = SessionContext::resolve(&app_state.session_keys, &headers);

    let result: ApiResult<_> = async {
        let client = app_state.chat_model.client().map_err(|reason| {
            warn!("Chat requested but model is unavailable");
            ApiError::chat(ErrorKind::Unavailable(reason.to_string()))
        })?;

        let message = parse_chat_message(&body)?;
        let sentiment = analyze(&message, app_state.sentiment_mode);
        info!(
            "Chat message received: sentiment={}, length={}",
            sentiment.label(),
            message.chars().count()
        );

        let mut data = app_state
            .sessions
            .get(&session.id)
            .await
            .map_err(ApiError::chat)?
            .unwrap_or_default();

        let prompt = build_chat_prompt(app_state.persona, sentiment, &message);
        let reply = client
            .continue_conversation(data.history.messages(), &prompt)
            .await
            .map_err(ApiError::chat)?;

        data.history.append(Role::User, message);
        data.history.append(Role::Model, reply.clone());
        data.history.trim(app_state.max_history);
        data.touch();
        let turns = data.history.pair_count();
        app_state
            .sessions
            .set(&session.id, data)
            .await
            .map_err(ApiError::chat)?;

        info!("Chat reply sent: length={}, turns={}", reply.chars().count(), turns);

        Ok(Json(ChatResponse {
            reply,
            sentiment_detected: sentiment.label(),
            timestamp: Utc::now().to_rfc3339(),
        }))
    }
    .await;

    let response = match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    };
    session.attach(&app_state.session_keys, response)
}
