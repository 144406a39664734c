use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::imagery::EncodedImage;
use crate::models::parameters::{Resolution, ZoomLevel};

#[derive(Serialize, ToSchema)]
pub struct HealthPayload {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ServicePayload {
    pub message: String,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct LocationCoordinatesPayload {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Coordinates {
    #[validate(custom(function = "crate::validation::validate_lat"))]
    #[schema(example = 25.2048, minimum = -90, maximum = 90)]
    pub lat: f64,
    #[validate(custom(function = "crate::validation::validate_lon"))]
    #[schema(example = 55.2708, minimum = -180, maximum = 180)]
    pub lon: f64,
}

/// Acquisition timestamps of the two imagery epochs actually compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AcquisitionDates {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChangeStatistics {
    pub changed_pixels: u64,
    #[schema(minimum = 0, maximum = 100)]
    pub change_percentage: f64,
}

/// Each entry carries its own format tag and can be decoded on its own.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ImageSet {
    pub before: EncodedImage,
    pub after: EncodedImage,
    pub overlay: EncodedImage,
}

/// Parameters the analysis ran with, after defaults were applied.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppliedParameters {
    pub zoom_level: ZoomLevel,
    pub span_degrees: f64,
    pub resolution: Resolution,
    pub meters_per_pixel: f64,
    pub overlay_alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalysisResult {
    pub success: bool,
    pub coordinates: Coordinates,
    pub parameters: AppliedParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<AcquisitionDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChangeStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
