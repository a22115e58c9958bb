//! HTTP client for the NewsAPI `everything` endpoint.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling, API key management,
//! and typed response deserialization. The API signals application-level
//! failures through a `"status": "error"` envelope, surfaced here as
//! [`NewsApiError::ApiError`].

mod client;
mod error;
mod types;

pub use client::NewsApiClient;
pub use error::NewsApiError;
pub use types::{Article, ArticleSource};
