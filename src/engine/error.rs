//! Analysis engine error types.

use thiserror::Error;

use crate::imagery::ImageError;

pub(crate) type EngineResult<T> = Result<T, EngineError>;

/// Transport or contract failures. A structured "analysis did not succeed"
/// answer is not an error; see [`super::EngineOutcome::Unsuccessful`].
#[derive(Debug, Error)]
pub(crate) enum EngineError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("engine returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid {kind} image: {source}")]
    Image {
        kind: &'static str,
        #[source]
        source: ImageError,
    },
}
