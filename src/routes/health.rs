use actix_web::HttpResponse;

use crate::models::{HealthPayload, ServicePayload};

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service banner", body = ServicePayload))
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ServicePayload {
        message: "Geospatial Agent API".to_string(),
        status: "running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is healthy", body = HealthPayload))
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthPayload {
        status: "healthy".to_string(),
    })
}
