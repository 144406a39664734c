//! Request normalization and dispatch.
//!
//! Coordinate requests and place-name requests converge here on a single
//! [`AnalysisQuery`] and a single engine call. A name request is resolved
//! first and then takes exactly the coordinate path.

use std::sync::Arc;

use crate::engine::{AnalysisEngine, AnalysisQuery, ChangeReport, EngineOutcome};
use crate::errors::AppError;
use crate::models::{AnalysisResult, AppliedParameters, Coordinates, LocationInput, ParameterInput};
use crate::repositories::Geocoder;
use crate::validation::{self, AnalysisParameters};

/// Shared per-process context. Built once at startup, used read-only by
/// every request.
pub(crate) struct ChangeDetector {
    geocoder: Arc<dyn Geocoder>,
    engine: Arc<dyn AnalysisEngine>,
}

impl ChangeDetector {
    pub fn new(geocoder: Arc<dyn Geocoder>, engine: Arc<dyn AnalysisEngine>) -> Self {
        Self { geocoder, engine }
    }

    pub fn validate_parameters(input: &ParameterInput) -> Result<AnalysisParameters, AppError> {
        validation::validate_parameters(input)
    }

    /// Coordinates pass through (range-checked); names go to the geocoder.
    pub async fn resolve_location(&self, input: &LocationInput) -> Result<Coordinates, AppError> {
        match input {
            LocationInput::Coordinates(coords) => {
                validation::validate_coordinates(coords)?;
                Ok(*coords)
            }
            LocationInput::Name(name) => {
                let name = validation::validate_location_name(Some(name.as_str()))?;
                let coords = self
                    .geocoder
                    .geocode(&name)
                    .await?
                    .ok_or_else(|| AppError::LocationNotFound(format!("Location not found: {name}")))?;
                log::info!("Resolved '{name}' to ({}, {})", coords.lat, coords.lon);
                Ok(coords)
            }
        }
    }

    /// One engine call. Structured failures come back as `success: false`;
    /// transport and contract failures are errors.
    pub async fn run_analysis(
        &self,
        coordinates: Coordinates,
        params: &AnalysisParameters,
    ) -> Result<AnalysisResult, AppError> {
        let query = AnalysisQuery::new(coordinates, params);
        log::info!(
            "Analyzing ({}, {}) zoom={} resolution={} alpha={}",
            coordinates.lat,
            coordinates.lon,
            params.zoom_level,
            params.resolution,
            params.overlay_alpha
        );

        let outcome = self.engine.analyze_change(&query).await?;
        Ok(assemble_result(&query, outcome))
    }

    /// Validate, resolve, dispatch. Parameters are checked before the
    /// geocoder or the engine is touched.
    pub async fn analyze(
        &self,
        location: &LocationInput,
        input: &ParameterInput,
    ) -> Result<AnalysisResult, AppError> {
        let params = Self::validate_parameters(input)?;
        let coordinates = self.resolve_location(location).await?;
        self.run_analysis(coordinates, &params).await
    }
}

fn assemble_result(query: &AnalysisQuery, outcome: EngineOutcome) -> AnalysisResult {
    let mut result = AnalysisResult {
        success: false,
        coordinates: query.coordinates,
        parameters: AppliedParameters {
            zoom_level: query.zoom_level,
            span_degrees: query.zoom_level.span_degrees(),
            resolution: query.resolution,
            meters_per_pixel: query.resolution.meters_per_pixel(),
            overlay_alpha: query.overlay_alpha,
        },
        dates: None,
        statistics: None,
        images: None,
        summary: None,
        message: None,
    };

    match outcome {
        EngineOutcome::Completed(ChangeReport {
            dates,
            statistics,
            images,
            summary,
        }) => {
            result.success = true;
            result.dates = Some(dates);
            result.statistics = Some(statistics);
            result.images = Some(images);
            result.summary = Some(summary);
        }
        EngineOutcome::Unsuccessful(message) => {
            log::warn!(
                "Analysis unsuccessful at ({}, {}): {message}",
                query.coordinates.lat,
                query.coordinates.lon
            );
            result.message = Some(message);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resolution, ZoomLevel};
    use crate::testing::{dubai, FakeGeocoder, RecordingEngine};

    fn detector(engine: Arc<RecordingEngine>) -> ChangeDetector {
        ChangeDetector::new(Arc::new(FakeGeocoder::with_dubai()), engine)
    }

    fn input(zoom: &str, res: &str, alpha: f64) -> ParameterInput {
        ParameterInput {
            zoom_level: Some(zoom.into()),
            resolution: Some(res.into()),
            overlay_alpha: Some(alpha),
            time_range: None,
        }
    }

    #[actix_web::test]
    async fn name_request_is_sugar_over_coordinates() {
        let engine = Arc::new(RecordingEngine::completed());
        let d = detector(engine.clone());
        let params = input("Block-Level", "Fine (2.5m)", 0.3);

        let by_name = d
            .analyze(&LocationInput::Name("Dubai".into()), &params)
            .await
            .unwrap();
        let by_coords = d
            .analyze(&LocationInput::Coordinates(dubai()), &params)
            .await
            .unwrap();

        let calls = engine.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].zoom_level, ZoomLevel::BlockLevel);
        assert_eq!(calls[0].resolution, Resolution::Fine);
        assert_eq!(by_name, by_coords);
    }

    #[actix_web::test]
    async fn invalid_parameters_never_reach_collaborators() {
        let engine = Arc::new(RecordingEngine::completed());
        let geocoder = Arc::new(FakeGeocoder::with_dubai());
        let d = ChangeDetector::new(geocoder.clone(), engine.clone());

        let err = d
            .analyze(
                &LocationInput::Name("Dubai".into()),
                &input("Street", "Standard", 0.4),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));

        let err = d
            .analyze(
                &LocationInput::Coordinates(dubai()),
                &input("City-Wide", "Standard", 1.5),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));

        assert!(engine.calls().is_empty());
        assert_eq!(geocoder.lookups(), 0);
    }

    #[actix_web::test]
    async fn unknown_place_is_not_found() {
        let engine = Arc::new(RecordingEngine::completed());
        let d = detector(engine.clone());
        let err = d
            .resolve_location(&LocationInput::Name("Atlantis".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LocationNotFound(_)));
        assert!(engine.calls().is_empty());
    }

    #[actix_web::test]
    async fn out_of_range_coordinates_are_rejected() {
        let d = detector(Arc::new(RecordingEngine::completed()));
        let err = d
            .resolve_location(&LocationInput::Coordinates(Coordinates { lat: 95.0, lon: 0.0 }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[actix_web::test]
    async fn structured_failure_becomes_unsuccessful_result() {
        let d = detector(Arc::new(RecordingEngine::unsuccessful("no imagery")));
        let result = d
            .analyze(&LocationInput::Coordinates(dubai()), &ParameterInput::default())
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("no imagery"));
        assert_eq!(result.coordinates, dubai());
        assert!(result.images.is_none());
    }

    #[actix_web::test]
    async fn transport_failure_is_analysis_failed() {
        let d = detector(Arc::new(RecordingEngine::failing()));
        let err = d
            .analyze(&LocationInput::Coordinates(dubai()), &ParameterInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AnalysisFailed(_)));
    }

    #[actix_web::test]
    async fn concurrent_identical_requests_are_each_served() {
        let engine = Arc::new(RecordingEngine::completed());
        let d = detector(engine.clone());
        let loc = LocationInput::Coordinates(dubai());
        let params = ParameterInput::default();

        let (a, b) = tokio::join!(d.analyze(&loc, &params), d.analyze(&loc, &params));
        assert!(a.unwrap().success);
        assert!(b.unwrap().success);
        assert_eq!(engine.calls().len(), 2);
    }
}
