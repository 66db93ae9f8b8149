//! API endpoint configuration.
//!
//! The base URL is resolved once at startup and injected into
//! [`HttpApi`](crate::api::HttpApi); nothing reads the environment after that.

use std::time::Duration;

use crate::config_file::ConfigFile;

/// Fallback when no flag, environment variable, or config file names a backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable consulted for the base URL.
pub const API_URL_ENV: &str = "PAPERSUM_API_URL";
/// Older name still honored after [`API_URL_ENV`].
pub const LEGACY_API_URL_ENV: &str = "API_URL";

pub const SEARCH_PATH: &str = "/api/papers/search/";
pub const ANALYZE_PATH: &str = "/api/analyze/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request deadline. `None` lets requests run to completion.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve from CLI flag > `PAPERSUM_API_URL` > `API_URL` > config file > default.
    pub fn resolve(cli_url: Option<String>, file: &ConfigFile) -> Self {
        Self::resolve_with(cli_url, |key| std::env::var(key).ok(), file)
    }

    /// Like [`resolve`](Self::resolve) with an injectable environment lookup.
    pub fn resolve_with(
        cli_url: Option<String>,
        env: impl Fn(&str) -> Option<String>,
        file: &ConfigFile,
    ) -> Self {
        let non_empty = |v: String| {
            let trimmed = v.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        let (base_url, source) = if let Some(url) = cli_url.and_then(non_empty) {
            (url, "flag")
        } else if let Some(url) = env(API_URL_ENV).and_then(non_empty) {
            (url, API_URL_ENV)
        } else if let Some(url) = env(LEGACY_API_URL_ENV).and_then(non_empty) {
            (url, LEGACY_API_URL_ENV)
        } else if let Some(url) = file.base_url().map(str::to_string).and_then(non_empty) {
            (url, "config file")
        } else {
            (DEFAULT_API_URL.to_string(), "default")
        };

        tracing::debug!(base_url = %base_url, source, "resolved API base URL");

        Self::new(base_url).with_timeout(file.timeout_secs().map(Duration::from_secs))
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{}?query={}",
            self.base_url,
            SEARCH_PATH,
            urlencoding::encode(query)
        )
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config_file::ApiSection;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn file_with_url(url: &str) -> ConfigFile {
        ConfigFile {
            api: Some(ApiSection {
                base_url: Some(url.to_string()),
                timeout_secs: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn falls_back_to_default() {
        let cfg = ApiConfig::resolve_with(None, env_of(&[]), &ConfigFile::default());
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn flag_beats_env_and_file() {
        let cfg = ApiConfig::resolve_with(
            Some("http://flag:1".into()),
            env_of(&[(API_URL_ENV, "http://env:2")]),
            &file_with_url("http://file:3"),
        );
        assert_eq!(cfg.base_url, "http://flag:1");
    }

    #[test]
    fn env_beats_legacy_env_and_file() {
        let cfg = ApiConfig::resolve_with(
            None,
            env_of(&[(API_URL_ENV, "http://env:2"), (LEGACY_API_URL_ENV, "http://old:4")]),
            &file_with_url("http://file:3"),
        );
        assert_eq!(cfg.base_url, "http://env:2");
    }

    #[test]
    fn legacy_env_used_when_primary_missing() {
        let cfg = ApiConfig::resolve_with(
            None,
            env_of(&[(LEGACY_API_URL_ENV, "http://old:4")]),
            &file_with_url("http://file:3"),
        );
        assert_eq!(cfg.base_url, "http://old:4");
    }

    #[test]
    fn blank_env_is_ignored() {
        let cfg = ApiConfig::resolve_with(
            None,
            env_of(&[(API_URL_ENV, "   ")]),
            &file_with_url("http://file:3"),
        );
        assert_eq!(cfg.base_url, "http://file:3");
    }

    #[test]
    fn timeout_comes_from_file() {
        let file = ConfigFile {
            api: Some(ApiSection {
                base_url: None,
                timeout_secs: Some(12),
            }),
            ..Default::default()
        };
        let cfg = ApiConfig::resolve_with(None, env_of(&[]), &file);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn trailing_slash_stripped() {
        let cfg = ApiConfig::new("http://localhost:8000/");
        assert_eq!(cfg.analyze_url(), "http://localhost:8000/api/analyze/");
    }

    #[test]
    fn search_url_percent_encodes_query() {
        let cfg = ApiConfig::default();
        assert_eq!(
            cfg.search_url("machine learning & co"),
            "http://localhost:8000/api/papers/search/?query=machine%20learning%20%26%20co"
        );
    }
}
