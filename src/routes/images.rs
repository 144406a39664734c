use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::detector::ChangeDetector;
use crate::errors::AppError;
use crate::models::{ImageKind, ImageQuery, LocationInput};

#[utoipa::path(
    get,
    path = "/images/{location}/{type}",
    tag = "Change Detection",
    summary = "Download one analysis image",
    description = "Runs the analysis and returns a single raster as raw bytes. \
        `location` is a place name or a literal `lat,lon` pair.",
    params(
        ("location" = String, Path, example = "Dubai"),
        ("type" = String, Path, description = "before | after | overlay"),
        ("zoom_level" = Option<String>, Query, example = "City-Wide (0.025°)"),
        ("resolution" = Option<String>, Query, example = "Standard (5m)"),
        ("overlay_alpha" = Option<f64>, Query, minimum = 0, maximum = 1)
    ),
    responses(
        (status = 200, description = "Raster bytes; Content-Type is image/png, image/jpeg, image/tiff or image/webp"),
        (status = 400, description = "Invalid parameter or image type"),
        (status = 404, description = "Location not found or engine produced no image"),
        (status = 500, description = "Analysis engine unreachable or misbehaving")
    )
)]
pub(crate) async fn image(
    detector: web::Data<ChangeDetector>,
    path: web::Path<(String, String)>,
    query: web::Query<ImageQuery>,
) -> ActixResult<HttpResponse> {
    let (location, kind) = path.into_inner();
    let kind: ImageKind = kind.parse().map_err(AppError::InvalidParameter)?;
    let location = LocationInput::from_path_segment(&location);

    let result = detector
        .analyze(&location, &query.into_inner().into())
        .await?;

    let images = match result.images {
        Some(images) if result.success => images,
        _ => {
            let reason = result
                .message
                .unwrap_or_else(|| "analysis produced no images".to_string());
            return Err(AppError::ImageUnavailable(reason).into());
        }
    };

    let image = match kind {
        ImageKind::Before => images.before,
        ImageKind::After => images.after,
        ImageKind::Overlay => images.overlay,
    };
    let bytes = image
        .decode()
        .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(image.format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(format!(
                "{}.{}",
                kind.as_str(),
                image.format.extension()
            ))],
        })
        .body(bytes))
}
