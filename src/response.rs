use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Top-level shape of every analysis response. A business failure from the
/// engine still travels in a 200 with `status: "error"`.
#[derive(Serialize, ToSchema)]
pub struct AnalysisEnvelope {
    pub status: EnvelopeStatus,
    pub data: AnalysisResult,
}

pub(crate) fn build_envelope(result: AnalysisResult) -> AnalysisEnvelope {
    let status = if result.success {
        EnvelopeStatus::Success
    } else {
        EnvelopeStatus::Error
    };
    AnalysisEnvelope { status, data: result }
}

impl AnalysisEnvelope {
    pub fn ok(result: AnalysisResult) -> HttpResponse {
        HttpResponse::Ok().json(build_envelope(result))
    }
}
