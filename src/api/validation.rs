// src/api/validation.rs
//! Request body validation.
//!
//! Handlers take the raw body and validate here so that malformed input gets
//! our error shape instead of the framework's extractor rejection.

use serde_json::{Map, Value};

use super::error::{ApiError, ErrorKind};
use crate::mood::{MoodRequest, is_valid_score};

const NO_DATA: &str = "No data provided";
const NOT_AN_OBJECT: &str = "Request body must be a JSON object";
const SCORE_REQUIRED: &str = "mood_score is required";
const SCORE_INVALID: &str = "mood_score must be a number between 1 and 10";
const DESCRIPTION_INVALID: &str = "mood_description must be a string";

enum Body {
    Missing,
    NotAnObject,
    Object(Map<String, Value>),
}

/// Blank, unparsable and `null` bodies all count as missing.
fn read_body(body: &[u8]) -> Body {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Body::Missing;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Body::Object(map),
        Ok(Value::Null) | Err(_) => Body::Missing,
        Ok(_) => Body::NotAnObject,
    }
}

/// Validates a `/motivational-quotes` body.
pub fn parse_mood_request(body: &[u8]) -> Result<MoodRequest, ApiError> {
    let data = match read_body(body) {
        Body::Missing => return Err(ApiError::invalid_input(NO_DATA)),
        Body::NotAnObject => return Err(ApiError::invalid_input(NOT_AN_OBJECT)),
        Body::Object(map) if map.is_empty() => return Err(ApiError::invalid_input(NO_DATA)),
        Body::Object(map) => map,
    };

    let mood_score = match data.get("mood_score") {
        None | Some(Value::Null) => return Err(ApiError::invalid_input(SCORE_REQUIRED)),
        Some(Value::Number(number)) => number.clone(),
        Some(_) => return Err(ApiError::invalid_input(SCORE_INVALID)),
    };
    match mood_score.as_f64() {
        Some(score) if is_valid_score(score) => {}
        _ => return Err(ApiError::invalid_input(SCORE_INVALID)),
    }

    let mood_description = match data.get("mood_description") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err(ApiError::invalid_input(DESCRIPTION_INVALID)),
    };

    Ok(MoodRequest {
        mood_score,
        mood_description,
    })
}

/// Extracts the trimmed chat message. Anything unusable is an empty message.
pub fn parse_chat_message(body: &[u8]) -> Result<String, ApiError> {
    let message = match read_body(body) {
        Body::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };

    if message.is_empty() {
        return Err(ApiError::chat(ErrorKind::EmptyMessage));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::Surface;

    fn invalid_message(result: Result<MoodRequest, ApiError>) -> String {
        match result {
            Err(ApiError {
                kind: ErrorKind::InvalidInput(message),
                surface: Surface::Json,
            }) => message,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn missing_or_empty_body() {
        assert_eq!(invalid_message(parse_mood_request(b"")), NO_DATA);
        assert_eq!(invalid_message(parse_mood_request(b"{}")), NO_DATA);
        assert_eq!(invalid_message(parse_mood_request(b"{not json")), NO_DATA);
        assert_eq!(invalid_message(parse_mood_request(b"[1]")), NOT_AN_OBJECT);
    }

    #[test]
    fn score_must_be_present_numeric_and_in_range() {
        assert_eq!(
            invalid_message(parse_mood_request(br#"{"mood_description": "meh"}"#)),
            SCORE_REQUIRED
        );
        assert_eq!(invalid_message(parse_mood_request(br#"{"mood_score": null}"#)), SCORE_REQUIRED);
        for body in [
            r#"{"mood_score": "5"}"#,
            r#"{"mood_score": true}"#,
            r#"{"mood_score": 0}"#,
            r#"{"mood_score": 10.01}"#,
            r#"{"mood_score": -3}"#,
        ] {
            assert_eq!(invalid_message(parse_mood_request(body.as_bytes())), SCORE_INVALID, "{body}");
        }
    }

    #[test]
    fn accepts_integer_and_float_scores() {
        let request = parse_mood_request(br#"{"mood_score": 1}"#).unwrap();
        assert_eq!(request.mood_score.as_i64(), Some(1));
        assert_eq!(request.mood_description, "");

        let request =
            parse_mood_request(br#"{"mood_score": 7.5, "mood_description": "okay-ish"}"#).unwrap();
        assert_eq!(request.score(), 7.5);
        assert_eq!(request.mood_description, "okay-ish");
    }

    #[test]
    fn description_must_be_text() {
        assert_eq!(
            invalid_message(parse_mood_request(br#"{"mood_score": 5, "mood_description": 3}"#)),
            DESCRIPTION_INVALID
        );
    }

    #[test]
    fn chat_message_is_trimmed() {
        assert_eq!(parse_chat_message(br#"{"message": "  hi there \n"}"#).unwrap(), "hi there");
    }

    #[test]
    fn blank_chat_messages_are_empty() {
        let bodies: [&[u8]; 5] = [b"", b"{}", br#"{"message": "   "}"#, br#"{"message": 5}"#, b"nope"];
        for body in bodies {
            let err = parse_chat_message(body).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::EmptyMessage));
            assert_eq!(err.surface, Surface::Chat);
        }
    }
}
