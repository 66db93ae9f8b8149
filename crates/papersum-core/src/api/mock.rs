//! Mock API for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{ApiError, ApiFuture, PaperApi};
use crate::{AnalysisResult, Paper};

/// A configurable mock response for [`MockApi`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Successful search returning these papers.
    Papers(Vec<Paper>),
    /// Successful analysis returning this result.
    Analysis(AnalysisResult),
    /// Non-2xx status with an optional `{"error": ...}` message.
    Status { status: u16, message: Option<String> },
}

/// A request observed by [`MockApi`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    Search { query: String },
    Analyze { text: String },
}

/// A hand-rolled mock implementing [`PaperApi`] for tests.
///
/// Search and analyze each take a response sequence: one response per call,
/// repeating the last once exhausted. Every call is recorded so tests can
/// assert on exactly what would have gone over the wire.
pub struct MockApi {
    search_responses: Mutex<Vec<MockResponse>>,
    analyze_responses: Mutex<Vec<MockResponse>>,
    search_fallback: MockResponse,
    analyze_fallback: MockResponse,
    delay: Option<Duration>,
    calls: Mutex<Vec<MockCall>>,
    call_count: AtomicUsize,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(
            MockResponse::Papers(Vec::new()),
            MockResponse::Analysis(AnalysisResult::default()),
        )
    }
}

impl MockApi {
    /// Create a mock that always returns the given responses.
    pub fn new(search: MockResponse, analyze: MockResponse) -> Self {
        Self {
            search_responses: Mutex::new(Vec::new()),
            analyze_responses: Mutex::new(Vec::new()),
            search_fallback: search,
            analyze_fallback: analyze,
            delay: None,
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Mock whose searches always return `papers`.
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        Self {
            search_fallback: MockResponse::Papers(papers),
            ..Self::default()
        }
    }

    /// Mock whose analyses always return `result`.
    pub fn with_analysis(result: AnalysisResult) -> Self {
        Self {
            analyze_fallback: MockResponse::Analysis(result),
            ..Self::default()
        }
    }

    /// Replace search responses with a sequence, repeating the last.
    pub fn search_sequence(self, responses: Vec<MockResponse>) -> Self {
        let (queue, fallback) = into_queue(responses);
        Self {
            search_responses: Mutex::new(queue),
            search_fallback: fallback,
            ..self
        }
    }

    /// Replace analyze responses with a sequence, repeating the last.
    pub fn analyze_sequence(self, responses: Vec<MockResponse>) -> Self {
        let (queue, fallback) = into_queue(responses);
        Self {
            analyze_responses: Mutex::new(queue),
            analyze_fallback: fallback,
            ..self
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of calls of either kind.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn next(queue: &Mutex<Vec<MockResponse>>, fallback: &MockResponse) -> MockResponse {
        queue
            .lock()
            .ok()
            .and_then(|mut q| q.pop())
            .unwrap_or_else(|| fallback.clone())
    }
}

/// Reverse so `pop()` yields responses in order; the last is the fallback.
fn into_queue(mut responses: Vec<MockResponse>) -> (Vec<MockResponse>, MockResponse) {
    assert!(
        !responses.is_empty(),
        "sequence must have at least one response"
    );
    let fallback = responses[responses.len() - 1].clone();
    responses.reverse();
    (responses, fallback)
}

fn status_error(status: u16, message: Option<String>) -> ApiError {
    ApiError::Status { status, message }
}

impl PaperApi for MockApi {
    fn search<'a>(&'a self, query: &'a str) -> ApiFuture<'a, Vec<Paper>> {
        self.record(MockCall::Search {
            query: query.to_string(),
        });
        let response = Self::next(&self.search_responses, &self.search_fallback);
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match response {
                MockResponse::Papers(papers) => Ok(papers),
                MockResponse::Status { status, message } => Err(status_error(status, message)),
                MockResponse::Analysis(_) => Err(status_error(
                    500,
                    Some("mock: analysis response queued for search".into()),
                )),
            }
        })
    }

    fn analyze<'a>(&'a self, text: &'a str) -> ApiFuture<'a, AnalysisResult> {
        self.record(MockCall::Analyze {
            text: text.to_string(),
        });
        let response = Self::next(&self.analyze_responses, &self.analyze_fallback);
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match response {
                MockResponse::Analysis(result) => Ok(result),
                MockResponse::Status { status, message } => Err(status_error(status, message)),
                MockResponse::Papers(_) => Err(status_error(
                    500,
                    Some("mock: search response queued for analyze".into()),
                )),
            }
        })
    }
}
