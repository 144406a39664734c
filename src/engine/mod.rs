//! Client side of the external change-detection engine.
//!
//! The engine does the imagery fetch, alignment and inference. This crate
//! only needs one call from it, expressed by [`AnalysisEngine`].

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub(crate) use client::HttpAnalysisEngine;
pub(crate) use error::{EngineError, EngineResult};
pub(crate) use types::{AnalysisQuery, ChangeReport, EngineOutcome};

#[async_trait]
pub(crate) trait AnalysisEngine: Send + Sync {
    /// Run one change analysis. Called exactly once per request; no retry.
    async fn analyze_change(&self, query: &AnalysisQuery) -> EngineResult<EngineOutcome>;
}
