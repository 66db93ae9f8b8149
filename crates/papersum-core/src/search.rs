//! Search flow: query string, loading flag, and the last result list.
//!
//! Requests are split into [`SearchController::begin`] and
//! [`SearchController::complete`] so an event loop can run the network call
//! elsewhere and resume exactly once. Each request carries an id; only the
//! most recently issued one may replace the results.

use crate::Paper;
use crate::api::{ApiError, PaperApi};

/// A search that has been started and awaits its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub query: String,
}

/// What [`SearchController::complete`] did with a response.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Results replaced; holds the new count.
    Replaced(usize),
    /// Request failed; previous results kept.
    Failed(ApiError),
    /// A newer search was issued after this one; response ignored.
    Superseded,
}

#[derive(Debug, Default)]
pub struct SearchController {
    /// Current contents of the query input.
    pub query: String,
    papers: Option<Vec<Paper>>,
    loading: bool,
    next_id: u64,
    latest_id: Option<u64>,
    last_error: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first successful search.
    pub fn papers(&self) -> Option<&[Paper]> {
        self.papers.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a search for `query`. Returns `None` without touching state when
    /// the trimmed query is empty.
    ///
    /// A search may be started while another is in flight; the older one is
    /// then superseded.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        if let Some(prev) = self.latest_id {
            tracing::debug!(prev, id, "superseding in-flight search");
        }
        self.latest_id = Some(id);
        self.loading = true;
        self.query = query.to_string();

        Some(SearchTicket {
            id,
            query: query.to_string(),
        })
    }

    /// Start a search for the current [`query`](Self::query).
    pub fn begin_current(&mut self) -> Option<SearchTicket> {
        let query = self.query.clone();
        self.begin(&query)
    }

    /// Apply the response for ticket `id`.
    pub fn complete(&mut self, id: u64, outcome: Result<Vec<Paper>, ApiError>) -> SearchOutcome {
        if self.latest_id != Some(id) {
            tracing::debug!(id, latest = ?self.latest_id, "discarding stale search response");
            return SearchOutcome::Superseded;
        }
        self.latest_id = None;
        self.loading = false;

        match outcome {
            Ok(papers) => {
                let count = papers.len();
                self.papers = Some(papers);
                self.last_error = None;
                SearchOutcome::Replaced(count)
            }
            Err(e) => {
                tracing::error!(error = %e, query = %self.query, "error searching papers");
                self.last_error = Some(e.to_string());
                SearchOutcome::Failed(e)
            }
        }
    }

    /// Begin, await `api`, and complete in one step.
    ///
    /// Returns `None` when the query was rejected before any request.
    pub async fn submit(&mut self, api: &dyn PaperApi, query: &str) -> Option<SearchOutcome> {
        let ticket = self.begin(query)?;
        let outcome = api.search(&ticket.query).await;
        Some(self.complete(ticket.id, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, MockCall, MockResponse};

    fn paper(id: &str) -> Paper {
        Paper {
            id: id.into(),
            arxiv_id: format!("2101.000{id}"),
            title: format!("Paper {id}"),
            authors: vec!["A".into()],
            abstract_text: "short".into(),
            summary: "S".into(),
            categories: vec!["cs.LG".into()],
            published_date: "2021-01-01".into(),
        }
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let mut c = SearchController::new();
        assert!(c.begin("").is_none());
        assert!(c.begin("   \t\n").is_none());
        assert!(!c.is_loading());
        assert!(c.papers().is_none());
    }

    #[test]
    fn begin_sets_loading_and_keeps_query_untrimmed() {
        let mut c = SearchController::new();
        let t = c.begin("  graphs ").unwrap();
        assert!(c.is_loading());
        assert_eq!(t.query, "  graphs ");
        assert_eq!(c.query, "  graphs ");
    }

    #[test]
    fn success_replaces_wholesale() {
        let mut c = SearchController::new();
        let t = c.begin("a").unwrap();
        c.complete(t.id, Ok(vec![paper("1"), paper("2")]));
        let t = c.begin("b").unwrap();
        let out = c.complete(t.id, Ok(vec![paper("3")]));
        assert!(matches!(out, SearchOutcome::Replaced(1)));
        let ids: Vec<_> = c.papers().unwrap().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
        assert!(!c.is_loading());
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut c = SearchController::new();
        let t = c.begin("a").unwrap();
        c.complete(t.id, Ok(vec![paper("1")]));

        let t = c.begin("b").unwrap();
        let out = c.complete(
            t.id,
            Err(ApiError::Status {
                status: 500,
                message: None,
            }),
        );
        assert!(matches!(out, SearchOutcome::Failed(_)));
        assert_eq!(c.papers().unwrap().len(), 1);
        assert!(!c.is_loading());
        assert!(c.last_error().unwrap().contains("500"));
    }

    #[test]
    fn older_response_arriving_last_is_discarded() {
        let mut c = SearchController::new();
        let first = c.begin("first").unwrap();
        let second = c.begin("second").unwrap();

        let out = c.complete(second.id, Ok(vec![paper("2")]));
        assert!(matches!(out, SearchOutcome::Replaced(1)));

        let out = c.complete(first.id, Ok(vec![paper("1"), paper("9")]));
        assert!(matches!(out, SearchOutcome::Superseded));
        assert_eq!(c.papers().unwrap()[0].id, "2");
        assert!(!c.is_loading());
    }

    #[test]
    fn loading_stays_set_until_latest_resolves() {
        let mut c = SearchController::new();
        let first = c.begin("first").unwrap();
        let second = c.begin("second").unwrap();

        c.complete(first.id, Ok(vec![paper("1")]));
        assert!(c.is_loading());
        assert!(c.papers().is_none());

        c.complete(second.id, Ok(vec![]));
        assert!(!c.is_loading());
        assert_eq!(c.papers().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn submit_issues_exactly_one_request() {
        let api = MockApi::with_papers(vec![paper("1")]);
        let mut c = SearchController::new();

        let out = c.submit(&api, "machine learning").await.unwrap();
        assert!(matches!(out, SearchOutcome::Replaced(1)));
        assert_eq!(
            api.calls(),
            vec![MockCall::Search {
                query: "machine learning".into()
            }]
        );
    }

    #[tokio::test]
    async fn submit_blank_issues_no_request() {
        let api = MockApi::default();
        let mut c = SearchController::new();
        assert!(c.submit(&api, "  ").await.is_none());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_failure_leaves_results_stale_but_valid() {
        let api = MockApi::default().search_sequence(vec![
            MockResponse::Papers(vec![paper("1")]),
            MockResponse::Status {
                status: 503,
                message: Some("down".into()),
            },
        ]);
        let mut c = SearchController::new();
        c.submit(&api, "x").await;
        let out = c.submit(&api, "y").await.unwrap();
        assert!(matches!(out, SearchOutcome::Failed(_)));
        assert_eq!(c.papers().unwrap()[0].id, "1");
        assert!(!c.is_loading());
    }
}
