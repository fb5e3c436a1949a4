// src/api/http/handlers.rs
// Service metadata endpoints

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::mood::{MAX_MOOD_SCORE, MIN_MOOD_SCORE};
use crate::state::AppState;

/// GET /health
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let chat_available = app_state.chat_model.is_available();
    let message = if chat_available {
        "Motivational quotes and chat are up"
    } else {
        "Running without a model; check GEMINI_API_KEY"
    };

    Json(json!({
        "status": "healthy",
        "message": message,
        "chat_available": chat_available,
        "model": app_state.chat_model.model_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /
pub async fn home_handler() -> impl IntoResponse {
    Json(json!({
        "message": "MoodLift API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /motivational-quotes": "Quotes tailored to a mood score",
            "POST /chat": "Talk with Alex",
            "POST /clear": "Forget this session's conversation",
            "GET /session-info": "Conversation stats for this session",
            "GET /health": "Service status",
        },
        "motivational_quotes": {
            "required_fields": {
                "mood_score": format!("number between {MIN_MOOD_SCORE} and {MAX_MOOD_SCORE}"),
            },
            "optional_fields": {
                "mood_description": "string describing how you feel",
            },
            "example_request": {
                "mood_score": 4,
                "mood_description": "Feeling a bit overwhelmed with work",
            },
        },
        "chat": {
            "required_fields": { "message": "string" },
            "example_request": { "message": "I had a rough day" },
        },
    }))
}
