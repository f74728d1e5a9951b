//! Client for the external search service.
//!
//! The service is an opaque ranking backend: it takes a query and an engine
//! name and returns a ranked list of results. Nothing about how it talks to
//! the engines is modelled here.

use std::time::Duration;

use crate::types::errors::SearchError;
use crate::types::search::{SearchEngine, SearchResult};
use crate::types::settings::SearchSettings;

/// HTTP client for `GET {base}{path}?q=..&engine=..`.
pub struct SearchClient {
    client: reqwest::Client,
    settings: SearchSettings,
}

impl SearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn default_engine(&self) -> SearchEngine {
        self.settings.default_engine
    }

    /// Runs `query` against `engine`. A blank query returns no results
    /// without touching the network.
    pub async fn search(&self, query: &str, engine: SearchEngine) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = url::Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(&self.settings.path))
            .map_err(|e| SearchError::Network(format!("invalid search url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("engine", engine.as_str());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        let results: Vec<SearchResult> =
            serde_json::from_str(&body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        log::debug!("Search for {:?} on {} returned {} results", query, engine, results.len());
        Ok(results)
    }
}
