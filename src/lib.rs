// src/lib.rs

pub mod api;
pub mod config;
pub mod llm;
pub mod mood;
pub mod persona;
pub mod prompt;
pub mod quotes;
pub mod sentiment;
pub mod session;
pub mod state;
