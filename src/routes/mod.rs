pub mod analyze;
pub mod health;
pub mod images;
pub mod locations;

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health))
        .route(
            "/locations/{name}/coordinates",
            web::get().to(locations::location_coordinates),
        )
        .route("/analyze", web::post().to(analyze::analyze))
        .route(
            "/analyze/location",
            web::post().to(analyze::analyze_by_location_name),
        )
        .route("/images/{location}/{type}", web::get().to(images::image));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidParameter(format!("Invalid request body: {err}")).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidParameter(format!("Invalid query string: {err}")).into()
}
