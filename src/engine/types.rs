//! Engine request/response types.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use crate::imagery::{EncodedImage, ImageFormat};
use crate::models::{
    AcquisitionDates, ChangeStatistics, Coordinates, ImageSet, Resolution, TimeRange, ZoomLevel,
};
use crate::validation::AnalysisParameters;

/// The canonical analysis call. Coordinate and name requests both reduce
/// to exactly this value before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnalysisQuery {
    pub coordinates: Coordinates,
    pub zoom_level: ZoomLevel,
    pub resolution: Resolution,
    pub overlay_alpha: f64,
    pub time_range: Option<TimeRange>,
}

impl AnalysisQuery {
    pub fn new(coordinates: Coordinates, params: &AnalysisParameters) -> Self {
        Self {
            coordinates,
            zoom_level: params.zoom_level,
            resolution: params.resolution,
            overlay_alpha: params.overlay_alpha,
            time_range: params.time_range,
        }
    }
}

/// A completed comparison of two imagery epochs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChangeReport {
    pub dates: AcquisitionDates,
    pub statistics: ChangeStatistics,
    pub images: ImageSet,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineOutcome {
    Completed(ChangeReport),
    /// The engine ran but reported a business failure (no imagery, cloud
    /// cover, ...). Carries its message.
    Unsuccessful(String),
}

/// Body posted to the engine.
#[derive(Debug, Serialize)]
pub(crate) struct EngineRequest<'a> {
    pub lat: f64,
    pub lon: f64,
    pub zoom_level: &'static str,
    pub zoom_span_deg: f64,
    pub resolution: &'static str,
    pub meters_per_pixel: f64,
    pub overlay_alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<&'a TimeRange>,
}

impl<'a> From<&'a AnalysisQuery> for EngineRequest<'a> {
    fn from(q: &'a AnalysisQuery) -> Self {
        Self {
            lat: q.coordinates.lat,
            lon: q.coordinates.lon,
            zoom_level: q.zoom_level.label(),
            zoom_span_deg: q.zoom_level.span_degrees(),
            resolution: q.resolution.label(),
            meters_per_pixel: q.resolution.meters_per_pixel(),
            overlay_alpha: q.overlay_alpha,
            time_range: q.time_range.as_ref(),
        }
    }
}

/// Images as the engine sends them: either tagged or bare base64.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawImage {
    Tagged { format: ImageFormat, data: String },
    Bare(String),
}

impl RawImage {
    fn normalize(&self, kind: &'static str) -> EngineResult<EncodedImage> {
        let image = match self {
            Self::Tagged { format, data } => EncodedImage::from_tagged(*format, data),
            Self::Bare(data) => EncodedImage::from_base64(data),
        };
        image.map_err(|source| EngineError::Image { kind, source })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImageSet {
    pub before: RawImage,
    pub after: RawImage,
    pub overlay: RawImage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EngineResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub dates: Option<AcquisitionDates>,
    #[serde(default)]
    pub statistics: Option<ChangeStatistics>,
    #[serde(default)]
    pub images: Option<RawImageSet>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl EngineResponse {
    /// Check the engine held up its end of the contract and turn the body
    /// into an outcome.
    pub fn into_outcome(self) -> EngineResult<EngineOutcome> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "analysis engine reported failure".to_string());
            return Ok(EngineOutcome::Unsuccessful(message));
        }

        let missing = |field: &str| EngineError::InvalidResponse(format!("missing `{field}`"));
        let dates = self.dates.ok_or_else(|| missing("dates"))?;
        let statistics = self.statistics.ok_or_else(|| missing("statistics"))?;
        let raw = self.images.ok_or_else(|| missing("images"))?;

        let pct = statistics.change_percentage;
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(EngineError::InvalidResponse(format!(
                "change_percentage {pct} outside [0, 100]"
            )));
        }

        let images = ImageSet {
            before: raw.before.normalize("before")?,
            after: raw.after.normalize("after")?,
            overlay: raw.overlay.normalize("overlay")?,
        };
        let summary = self
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Detected {:.2}% change ({} pixels) between {} and {}.",
                    pct, statistics.changed_pixels, dates.before, dates.after
                )
            });

        Ok(EngineOutcome::Completed(ChangeReport {
            dates,
            statistics,
            images,
            summary,
        }))
    }
}
