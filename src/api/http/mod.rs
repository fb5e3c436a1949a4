// src/api/http/mod.rs

pub mod chat;
pub mod handlers;
pub mod quotes;
pub mod router;
pub mod session;

pub use router::{API_VERSION, create_router};
