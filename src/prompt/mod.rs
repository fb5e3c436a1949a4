// src/prompt/mod.rs
// Prompt templates for the chat and quotes services

pub mod builder;

pub use builder::{build_chat_prompt, build_quotes_prompt, context_for};
