use serde::Serialize;

use super::{ApiError, ApiFuture, PaperApi, decode_response};
use crate::config::ApiConfig;
use crate::{AnalysisResult, Paper};

/// [`PaperApi`] over HTTP with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    config: ApiConfig,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("papersum/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

impl PaperApi for HttpApi {
    fn search<'a>(&'a self, query: &'a str) -> ApiFuture<'a, Vec<Paper>> {
        Box::pin(async move {
            let url = self.config.search_url(query);
            tracing::debug!(url = %url, "searching papers");

            let resp = self.client.get(&url).send().await?;
            let papers: Vec<Paper> = decode_response(resp).await?;

            tracing::info!(query, count = papers.len(), "search complete");
            Ok(papers)
        })
    }

    fn analyze<'a>(&'a self, text: &'a str) -> ApiFuture<'a, AnalysisResult> {
        Box::pin(async move {
            let url = self.config.analyze_url();
            tracing::debug!(url = %url, chars = text.chars().count(), "submitting text for analysis");

            // `.json()` sets `Content-Type: application/json`.
            let resp = self
                .client
                .post(&url)
                .json(&AnalyzeRequest { text })
                .send()
                .await?;
            let result: AnalysisResult = decode_response(resp).await?;

            tracing::info!(insights = result.insights.len(), "analysis complete");
            Ok(result)
        })
    }
}
