use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod analysis;
pub mod api;
pub mod config;
pub mod config_file;
pub mod ingest;
pub mod notify;
pub mod present;
pub mod search;

// Re-export for convenience
pub use analysis::{AnalysisController, AnalysisTicket};
pub use api::{ApiError, HttpApi, PaperApi};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use ingest::{FileCandidate, IngestError};
pub use notify::{Notification, Notifier, Severity};
pub use search::{SearchController, SearchOutcome, SearchTicket};

/// A paper record as returned by the search endpoint.
///
/// Papers are never mutated after deserialization; display state such as
/// abstract expansion lives in [`present::ExpansionMap`], keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    #[serde(default)]
    pub arxiv_id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Backend-generated summary attached to this paper.
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub published_date: String,
}

/// Structured output of the analyze endpoint.
///
/// `sentiment` and `topics` are part of the wire contract but are not
/// rendered by [`present::AnalysisView`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("file ingestion error: {0}")]
    Ingest(#[from] IngestError),
    #[error("validation error: {0}")]
    Validation(String),
}
