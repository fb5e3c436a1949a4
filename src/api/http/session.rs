// src/api/http/session.rs
// Session resolution plus the /clear and /session-info endpoints

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::session::{SessionKeys, generate_session_id};
use crate::state::AppState;

/// Session id for the current request.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: String,
    /// No valid cookie came in; one must be issued with the response
    pub is_new: bool,
}

impl SessionContext {
    pub fn resolve(keys: &SessionKeys, headers: &HeaderMap) -> Self {
        match keys.from_headers(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: generate_session_id(),
                is_new: true,
            },
        }
    }

    /// Adds `Set-Cookie` for freshly minted sessions.
    pub fn attach(&self, keys: &SessionKeys, mut response: Response) -> Response {
        if self.is_new {
            if let Some(cookie) = keys.set_cookie(&self.id) {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
        }
        response
    }
}

/// POST /clear
pub async fn clear_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = SessionContext::resolve(&app_state.session_keys, &headers);

    let result: ApiResult<_> = async {
        if !session.is_new {
            app_state
                .sessions
                .delete(&session.id)
                .await
                .map_err(ApiError::json)?;
            info!("Cleared conversation history");
        }

        Ok(Json(json!({
            "message": "Conversation history cleared",
            "timestamp": Utc::now().to_rfc3339(),
        })))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

/// GET /session-info
pub async fn session_info_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = SessionContext::resolve(&app_state.session_keys, &headers);

    let result: ApiResult<_> = async {
        let data = if session.is_new {
            None
        } else {
            app_state
                .sessions
                .get(&session.id)
                .await
                .map_err(ApiError::json)?
        };
        let info = data.unwrap_or_default().info();

        Ok(Json(json!({
            "session_active": info.session_active,
            "message_count": info.message_count,
            "last_interaction": info.last_interaction.map(|ts| ts.to_rfc3339()),
            "timestamp": Utc::now().to_rfc3339(),
        })))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
