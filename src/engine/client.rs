//! HTTP client for the analysis engine.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::{EngineError, EngineResult};
use super::types::{AnalysisQuery, EngineOutcome, EngineRequest, EngineResponse};
use super::AnalysisEngine;

const ANALYZE_PATH: &str = "/analyze-change";
/// Bytes of an error body kept for the log line.
const MAX_ERROR_BODY: usize = 512;

pub(crate) struct HttpAnalysisEngine {
    http: Client,
    base_url: String,
}

impl HttpAnalysisEngine {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EngineError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl AnalysisEngine for HttpAnalysisEngine {
    async fn analyze_change(&self, query: &AnalysisQuery) -> EngineResult<EngineOutcome> {
        let url = format!("{}{ANALYZE_PATH}", self.base_url);
        log::debug!("POST {url} for {:?}", query.coordinates);

        let response = self
            .http
            .post(&url)
            .json(&EngineRequest::from(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: EngineResponse = serde_json::from_slice(&bytes)
            .map_err(|e| EngineError::InvalidResponse(format!("malformed body: {e}")))?;
        parsed.into_outcome()
    }
}
