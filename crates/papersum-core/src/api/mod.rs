//! API trait and implementations for talking to the summarizer backend.

pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{AnalysisResult, Paper};

pub use http::HttpApi;

/// Boxed future returned by [`PaperApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Error from a single API call. Every variant is recoverable: callers keep
/// their previous state and report the failure.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// The two backend operations the client depends on.
pub trait PaperApi: Send + Sync {
    /// `GET /api/papers/search/?query=<query>`.
    fn search<'a>(&'a self, query: &'a str) -> ApiFuture<'a, Vec<Paper>>;

    /// `POST /api/analyze/` with `{ "text": text }`.
    fn analyze<'a>(&'a self, text: &'a str) -> ApiFuture<'a, AnalysisResult>;
}

/// Check the status of `resp` and deserialize its body as JSON.
///
/// Non-2xx responses become [`ApiError::Status`], carrying the backend's
/// `{"error": "..."}` message when the body has one.
pub async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Extract `error` from a JSON error body, if present.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
}
