// src/config/mod.rs
// Service configuration, loaded from .env and the process environment

use std::str::FromStr;
use std::time::Duration;

use crate::llm::GenerationSettings;
use crate::sentiment::SentimentMode;
use crate::session::history::DEFAULT_MAX_MESSAGES;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Variables that must be present when `REQUIRE_CREDENTIALS` is set
const REQUIRED_VARS: [&str; 2] = ["GEMINI_API_KEY", "SESSION_SECRET"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    // ── Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,

    // ── Chat generation profile
    pub chat_temperature: f32,
    pub chat_top_p: f32,
    pub chat_top_k: u32,
    pub chat_max_output_tokens: u32,
    pub chat_max_history: usize,
    pub chat_sentiment_mode: SentimentMode,

    // ── Sessions
    pub session_secret: Option<String>,
    pub session_idle_minutes: u64,
    pub session_max_entries: usize,

    // ── CORS
    pub allowed_origins: Vec<String>,

    // ── Server
    pub host: String,
    pub port: u16,
    pub require_credentials: bool,

    // ── Logging
    pub log_level: String,
}

/// Reads `key` from the environment, tolerating trailing `# comments`.
/// Missing or unparsable values fall back to `default`.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match env_value(key) {
        Some(clean_val) => match clean_val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, clean_val);
                default
            }
        },
        None => default,
    }
}

/// Credentials are taken verbatim apart from surrounding whitespace;
/// `#` is a legal character in a secret. Blank is `None`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|raw| clean_credential(&raw))
}

fn clean_credential(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|val| strip_comment(&val))
}

fn strip_comment(raw: &str) -> String {
    raw.split('#').next().unwrap_or("").trim().to_string()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_base_url: env_var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env_var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL.to_string()),
            chat_temperature: env_var_or("CHAT_TEMPERATURE", 0.9),
            chat_top_p: env_var_or("CHAT_TOP_P", 1.0),
            chat_top_k: env_var_or("CHAT_TOP_K", 1),
            chat_max_output_tokens: env_var_or("CHAT_MAX_OUTPUT_TOKENS", 2048),
            chat_max_history: env_var_or("CHAT_MAX_HISTORY", DEFAULT_MAX_MESSAGES),
            chat_sentiment_mode: env_var_or("CHAT_SENTIMENT_MODE", SentimentMode::Graded),
            session_secret: env_opt("SESSION_SECRET"),
            session_idle_minutes: env_var_or("SESSION_IDLE_MINUTES", 60),
            session_max_entries: env_var_or("SESSION_MAX_ENTRIES", 10_000),
            allowed_origins: parse_origins(&env_var_or("ALLOWED_ORIGINS", String::new())),
            host: env_var_or("MOODLIFT_HOST", "0.0.0.0".to_string()),
            port: env_var_or("MOODLIFT_PORT", 5000),
            require_credentials: env_var_or("REQUIRE_CREDENTIALS", false),
            log_level: env_var_or("MOODLIFT_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Generation profile for the chat model.
    pub fn chat_generation(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: Some(self.chat_temperature),
            top_p: Some(self.chat_top_p),
            top_k: Some(self.chat_top_k),
            max_output_tokens: Some(self.chat_max_output_tokens),
        }
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }

    /// Names of required variables that are not set.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .into_iter()
            .filter(|name| match *name {
                "GEMINI_API_KEY" => self.gemini_api_key.is_none(),
                "SESSION_SECRET" => self.session_secret.is_none(),
                _ => false,
            })
            .collect()
    }

    /// Fails with every missing variable name when credentials are mandatory.
    pub fn check_required(&self) -> anyhow::Result<()> {
        let missing = self.missing_required();
        if self.require_credentials && !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            chat_temperature: 0.9,
            chat_top_p: 1.0,
            chat_top_k: 1,
            chat_max_output_tokens: 2048,
            chat_max_history: DEFAULT_MAX_MESSAGES,
            chat_sentiment_mode: SentimentMode::Graded,
            session_secret: None,
            session_idle_minutes: 60,
            session_max_entries: 10_000,
            allowed_origins: Vec::new(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            require_credentials: false,
            log_level: "info".to_string(),
        }
    }
}
