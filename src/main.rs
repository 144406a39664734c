mod config;
mod db;
mod detector;
mod engine;
mod errors;
mod imagery;
mod models;
mod repositories;
mod response;
mod routes;
#[cfg(test)]
mod testing;
mod validation;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{DOCS_PATH, OPENAPI_PATH};
use crate::detector::ChangeDetector;
use crate::engine::HttpAnalysisEngine;
use crate::repositories::GazetteerGeocoder;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Change Detection API",
        description = "Urban change detection over satellite imagery.\n\n\
            Accepts a coordinate pair or a place name, normalizes both onto one analysis \
            call against the imagery engine, and returns change statistics with \
            self-describing before/after/overlay images.",
        version = "1.0.0"
    ),
    paths(
        routes::health::root,
        routes::health::health,
        routes::locations::location_coordinates,
        routes::analyze::analyze,
        routes::analyze::analyze_by_location_name,
        routes::images::image,
    ),
    components(schemas(
        models::HealthPayload, models::ServicePayload, models::LocationCoordinatesPayload,
        models::AnalysisRequest, models::LocationAnalysisRequest, models::LocationInput,
        models::ParameterInput, models::TimeRange, models::Coordinates,
        models::AnalysisResult, models::AppliedParameters, models::AcquisitionDates,
        models::ChangeStatistics, models::ImageSet, models::ZoomLevel, models::Resolution,
        imagery::EncodedImage, imagery::ImageFormat,
        response::AnalysisEnvelope, response::EnvelopeStatus,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Geocoding", description = "Place name resolution via the GeoNames gazetteer"),
        (name = "Change Detection", description = "Imagery change analysis"),
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    let cfg = config::Config::from_env();

    let pool = db::create_pool(&cfg)?;
    let engine = HttpAnalysisEngine::new(cfg.engine_url.clone(), cfg.engine_timeout)
        .map_err(io::Error::other)?;
    log::info!(
        "Analysis engine: {} (timeout {}s)",
        cfg.engine_url,
        cfg.engine_timeout.as_secs()
    );

    let detector = web::Data::new(ChangeDetector::new(
        Arc::new(GazetteerGeocoder::new(pool)),
        Arc::new(engine),
    ));

    let bind = format!("{}:{}", cfg.host, cfg.port);
    log::info!("Starting Change Detection API on {bind}");
    log::info!("Swagger UI: http://{bind}/docs/");

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new(r#"%a "%r" %s %b %Dms "%{User-Agent}i""#).exclude("/health"))
            .wrap(Cors::permissive())
            .app_data(detector.clone())
            .service(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, openapi.clone()))
            .configure(routes::configure_routes)
    })
    .bind(&bind)?
    .run()
    .await
}
