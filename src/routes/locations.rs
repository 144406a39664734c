use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::detector::ChangeDetector;
use crate::models::{LocationCoordinatesPayload, LocationInput};

#[utoipa::path(
    get,
    path = "/locations/{name}/coordinates",
    tag = "Geocoding",
    summary = "Resolve a place name",
    params(("name" = String, Path, description = "Place name, optionally with a country hint", example = "Dubai, UAE")),
    responses(
        (status = 200, description = "Resolved coordinates", body = LocationCoordinatesPayload),
        (status = 400, description = "Empty or overlong name"),
        (status = 404, description = "Location not found")
    )
)]
pub(crate) async fn location_coordinates(
    detector: web::Data<ChangeDetector>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    let coords = detector
        .resolve_location(&LocationInput::Name(name.clone()))
        .await?;

    Ok(HttpResponse::Ok().json(LocationCoordinatesPayload {
        location: name.trim().to_string(),
        latitude: coords.lat,
        longitude: coords.lon,
    }))
}
