use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::engine::EngineError;

#[derive(Debug)]
pub(crate) enum AppError {
    /// Bad enum value or out-of-range number; raised before any dispatch.
    InvalidParameter(String),
    LocationNotFound(String),
    /// The engine completed but had no image to hand back.
    ImageUnavailable(String),
    /// Transport or contract failure talking to the analysis engine.
    AnalysisFailed(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::LocationNotFound(msg) => write!(f, "location not found: {msg}"),
            Self::ImageUnavailable(msg) => write!(f, "image unavailable: {msg}"),
            Self::AnalysisFailed(msg) => write!(f, "analysis failed: {msg}"),
            Self::Database(msg) => write!(f, "database error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::LocationNotFound(_) | Self::ImageUnavailable(_) => StatusCode::NOT_FOUND,
            Self::AnalysisFailed(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            Self::InvalidParameter(msg)
            | Self::LocationNotFound(msg)
            | Self::ImageUnavailable(msg) => msg.as_str(),
            Self::AnalysisFailed(msg) => {
                log::error!("Analysis engine failure: {msg}");
                "analysis failed"
            }
            Self::Database(msg) => {
                log::error!("Database error: {msg}");
                "database connection error"
            }
        };
        HttpResponse::build(status).json(ErrorBody {
            code: status.as_u16(),
            message,
        })
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        let msg = if let Some(db_err) = err.as_db_error() {
            format!(
                "{}: {} (code: {})",
                db_err.severity(),
                db_err.message(),
                db_err.code().code()
            )
        } else {
            err.to_string()
        };
        Self::Database(msg)
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::AnalysisFailed(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}
