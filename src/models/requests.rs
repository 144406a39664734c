use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::responses::Coordinates;

pub const DEFAULT_ANALYSIS_TYPE: &str = "urban_change";
pub const DEFAULT_OVERLAY_ALPHA: f64 = 0.4;

/// Where to look: an explicit coordinate pair or a place name to geocode.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LocationInput {
    Coordinates(Coordinates),
    Name(String),
}

/// Imagery epochs to compare. Unset means the most recent available pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRange {
    #[schema(example = "2020-01-01")]
    pub start: NaiveDate,
    #[schema(example = "2023-12-31")]
    pub end: NaiveDate,
}

/// Tuning knobs shared by every analysis entry point. Omitted values take
/// the service defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ParameterInput {
    #[serde(default, alias = "zoomLevel")]
    #[schema(example = "City-Wide (0.025°)")]
    pub zoom_level: Option<String>,
    #[serde(default)]
    #[schema(example = "Standard (5m)")]
    pub resolution: Option<String>,
    #[serde(default, alias = "overlayAlpha", alias = "alpha")]
    #[validate(custom(function = "crate::validation::validate_alpha_field"))]
    #[schema(example = 0.4, minimum = 0, maximum = 1)]
    pub overlay_alpha: Option<f64>,
    #[serde(default, alias = "timeRange")]
    pub time_range: Option<TimeRange>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    pub location: LocationInput,
    #[serde(default, alias = "analysisType")]
    #[schema(example = "urban_change")]
    pub analysis_type: Option<String>,
    #[serde(flatten)]
    pub params: ParameterInput,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocationAnalysisRequest {
    #[serde(default, alias = "locationName")]
    #[schema(example = "Dubai, UAE")]
    pub location_name: Option<String>,
    /// Optional explicit location. A coordinate pair here takes precedence
    /// over `location_name`.
    #[serde(default)]
    pub location: Option<LocationInput>,
    #[serde(flatten)]
    pub params: ParameterInput,
}

impl LocationAnalysisRequest {
    /// Coordinates win over a name; `None` when neither form was supplied.
    pub fn target(&self) -> Option<LocationInput> {
        match (&self.location, &self.location_name) {
            (Some(coords @ LocationInput::Coordinates(_)), _) => Some(coords.clone()),
            (_, Some(name)) => Some(LocationInput::Name(name.clone())),
            (location, None) => location.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ImageQuery {
    #[serde(default, alias = "zoomLevel")]
    pub zoom_level: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, alias = "overlayAlpha", alias = "alpha")]
    pub overlay_alpha: Option<f64>,
}

impl From<ImageQuery> for ParameterInput {
    fn from(q: ImageQuery) -> Self {
        Self {
            zoom_level: q.zoom_level,
            resolution: q.resolution,
            overlay_alpha: q.overlay_alpha,
            time_range: None,
        }
    }
}

impl LocationInput {
    /// Reads a path segment: `"lat,lon"` is taken as coordinates, anything
    /// else as a place name.
    pub fn from_path_segment(segment: &str) -> Self {
        let parsed = segment.split_once(',').and_then(|(lat, lon)| {
            Some(Coordinates {
                lat: lat.trim().parse().ok()?,
                lon: lon.trim().parse().ok()?,
            })
        });
        match parsed {
            Some(coords) => Self::Coordinates(coords),
            None => Self::Name(segment.to_string()),
        }
    }
}
