// src/api/http/quotes.rs

use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::Number;
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, ErrorKind};
use crate::api::validation::parse_mood_request;
use crate::mood::get_mood_context;
use crate::prompt::build_quotes_prompt;
use crate::quotes::{QuoteResult, extract_quotes};
use crate::state::AppState;

#[derive(Serialize)]
pub struct QuotesResponse {
    pub mood_score: Number,
    pub mood_context: &'static str,
    pub mood_description: String,
    pub motivational_quotes: QuoteResult,
    pub total_quotes: usize,
}

/// POST /motivational-quotes
pub async fn motivational_quotes_handler(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let request = parse_mood_request(&body)?;
        let band = request.band();

        let client = app_state
            .quotes_model
            .client()
            .map_err(|reason| ApiError::json(ErrorKind::Unavailable(reason.to_string())))?;

        let raw = client
            .complete(&build_quotes_prompt(&request))
            .await
            .map_err(ApiError::json)?;
        let quotes = extract_quotes(&raw);

        info!(
            "Generated {} quotes for mood band {:?}",
            quotes.len(),
            band
        );

        Ok(Json(QuotesResponse {
            mood_score: request.mood_score.clone(),
            mood_context: get_mood_context(request.score()),
            mood_description: request.mood_description,
            total_quotes: quotes.len(),
            motivational_quotes: quotes,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
