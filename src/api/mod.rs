// src/api/mod.rs

pub mod error;
pub mod http;
pub mod validation;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use http::create_router;
