use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::detector::ChangeDetector;
use crate::errors::AppError;
use crate::models::{AnalysisRequest, LocationAnalysisRequest};
use crate::response::AnalysisEnvelope;
use crate::validation::validate_analysis_type;

/// Change detection at a coordinate pair (or an inline place name).
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Change Detection",
    summary = "Detect change at a location",
    description = "Compares two imagery epochs around the location and returns change \
        statistics plus before/after/overlay images.\n\n\
        `location` is either `{lat, lon}` or a place name. A failure reported by the \
        analysis engine itself (no imagery, cloud cover) is returned as a 200 with \
        `status: \"error\"` and `data.success: false`; only transport failures are 500s.",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Analysis envelope", body = AnalysisEnvelope),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Location not found"),
        (status = 500, description = "Analysis engine unreachable or misbehaving")
    )
)]
pub(crate) async fn analyze(
    detector: web::Data<ChangeDetector>,
    body: web::Json<AnalysisRequest>,
) -> ActixResult<HttpResponse> {
    let req = body.into_inner();
    validate_analysis_type(req.analysis_type.as_deref())?;

    let result = detector.analyze(&req.location, &req.params).await?;
    Ok(AnalysisEnvelope::ok(result))
}

/// Same analysis, addressed by place name.
#[utoipa::path(
    post,
    path = "/analyze/location",
    tag = "Change Detection",
    summary = "Detect change at a named place",
    description = "Geocodes `location_name` and runs the same analysis as `/analyze`. \
        If the body also carries `location` as `{lat, lon}`, those coordinates are used \
        and the name is not geocoded.",
    request_body = LocationAnalysisRequest,
    responses(
        (status = 200, description = "Analysis envelope", body = AnalysisEnvelope),
        (status = 400, description = "Missing location_name or invalid parameter"),
        (status = 404, description = "Location not found"),
        (status = 500, description = "Analysis engine unreachable or misbehaving")
    )
)]
pub(crate) async fn analyze_by_location_name(
    detector: web::Data<ChangeDetector>,
    body: web::Json<LocationAnalysisRequest>,
) -> ActixResult<HttpResponse> {
    let req = body.into_inner();
    let location = req
        .target()
        .ok_or_else(|| AppError::InvalidParameter("location_name is required".to_string()))?;

    let result = detector.analyze(&location, &req.params).await?;
    Ok(AnalysisEnvelope::ok(result))
}
