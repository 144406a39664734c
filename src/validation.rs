use crate::errors::AppError;
use crate::models::requests::{DEFAULT_ANALYSIS_TYPE, DEFAULT_OVERLAY_ALPHA};
use crate::models::{Coordinates, ParameterInput, Resolution, TimeRange, ZoomLevel};
use validator::{Validate, ValidationError};

pub const MAX_LOCATION_NAME_LEN: usize = 200;
pub const SUPPORTED_ANALYSIS_TYPES: &[&str] = &[DEFAULT_ANALYSIS_TYPE];

/// Fully validated analysis knobs. Only this type reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnalysisParameters {
    pub zoom_level: ZoomLevel,
    pub resolution: Resolution,
    pub overlay_alpha: f64,
    pub time_range: Option<TimeRange>,
}

pub fn validate_lat(lat: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::new("latitude"));
    }
    Ok(())
}

pub fn validate_lon(lon: f64) -> Result<(), ValidationError> {
    if !lon.is_finite() || !(-180.0..180.0).contains(&lon) {
        return Err(ValidationError::new("longitude"));
    }
    Ok(())
}

pub fn validate_alpha_field(alpha: f64) -> Result<(), ValidationError> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(ValidationError::new("overlay_alpha"));
    }
    Ok(())
}

pub fn validate_coordinates(coords: &Coordinates) -> Result<(), AppError> {
    coords
        .validate()
        .map_err(|e| AppError::InvalidParameter(format!("Validation failed: {e}")))
}

pub fn validate_time_range(range: &TimeRange) -> Result<(), AppError> {
    if range.start > range.end {
        return Err(AppError::InvalidParameter(format!(
            "time_range start {} is after end {}",
            range.start, range.end
        )));
    }
    Ok(())
}

pub fn validate_analysis_type(analysis_type: Option<&str>) -> Result<(), AppError> {
    let Some(kind) = analysis_type else {
        return Ok(());
    };
    if !SUPPORTED_ANALYSIS_TYPES.contains(&kind.trim()) {
        return Err(AppError::InvalidParameter(format!(
            "Invalid analysis_type '{}'. Valid values: {}",
            kind,
            SUPPORTED_ANALYSIS_TYPES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_location_name(name: Option<&str>) -> Result<String, AppError> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::InvalidParameter(
            "location_name is required".to_string(),
        ));
    }
    if name.chars().count() > MAX_LOCATION_NAME_LEN {
        return Err(AppError::InvalidParameter(format!(
            "location_name must be at most {MAX_LOCATION_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Check every tuning knob against its closed enumeration or range and
/// apply defaults. Unknown values are errors, never silent fallbacks.
pub(crate) fn validate_parameters(input: &ParameterInput) -> Result<AnalysisParameters, AppError> {
    input
        .validate()
        .map_err(|e| AppError::InvalidParameter(format!("Validation failed: {e}")))?;

    let zoom_level = match input.zoom_level.as_deref() {
        Some(z) => z.parse().map_err(AppError::InvalidParameter)?,
        None => ZoomLevel::default(),
    };
    let resolution = match input.resolution.as_deref() {
        Some(r) => r.parse().map_err(AppError::InvalidParameter)?,
        None => Resolution::default(),
    };
    if let Some(range) = &input.time_range {
        validate_time_range(range)?;
    }

    Ok(AnalysisParameters {
        zoom_level,
        resolution,
        overlay_alpha: input.overlay_alpha.unwrap_or(DEFAULT_OVERLAY_ALPHA),
        time_range: input.time_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params(zoom: Option<&str>, res: Option<&str>, alpha: Option<f64>) -> ParameterInput {
        ParameterInput {
            zoom_level: zoom.map(String::from),
            resolution: res.map(String::from),
            overlay_alpha: alpha,
            time_range: None,
        }
    }

    #[test]
    fn every_enum_pair_is_accepted() {
        for z in ZoomLevel::ALL {
            for r in Resolution::ALL {
                let p = validate_parameters(&params(Some(z.label()), Some(r.label()), None))
                    .unwrap();
                assert_eq!(p.zoom_level, z);
                assert_eq!(p.resolution, r);
            }
        }
    }

    #[test]
    fn values_outside_enumerations_are_rejected() {
        for (zoom, res) in [
            (Some("Planet"), None),
            (None, Some("Standard (4m)")),
            (Some("city wide"), Some("Fine")),
            (Some(""), None),
        ] {
            assert!(matches!(
                validate_parameters(&params(zoom, res, None)),
                Err(AppError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn defaults_apply() {
        let p = validate_parameters(&ParameterInput::default()).unwrap();
        assert_eq!(p.zoom_level, ZoomLevel::CityWide);
        assert_eq!(p.resolution, Resolution::Standard);
        assert_eq!(p.overlay_alpha, 0.4);
        assert_eq!(p.time_range, None);
    }

    #[test]
    fn alpha_bounds() {
        for ok in [0.0, 0.4, 1.0] {
            let p = validate_parameters(&params(None, None, Some(ok))).unwrap();
            assert_eq!(p.overlay_alpha, ok);
        }
        for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_parameters(&params(None, None, Some(bad))),
                Err(AppError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let mut input = ParameterInput::default();
        input.time_range = Some(TimeRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        });
        assert!(matches!(
            validate_parameters(&input),
            Err(AppError::InvalidParameter(_))
        ));
    }

    #[test]
    fn coordinate_ranges() {
        assert!(validate_coordinates(&Coordinates { lat: 25.2048, lon: 55.2708 }).is_ok());
        assert!(validate_coordinates(&Coordinates { lat: 90.0, lon: -180.0 }).is_ok());
        assert!(validate_coordinates(&Coordinates { lat: 90.1, lon: 0.0 }).is_err());
        assert!(validate_coordinates(&Coordinates { lat: 0.0, lon: 180.0 }).is_err());
        assert!(validate_coordinates(&Coordinates { lat: f64::NAN, lon: 0.0 }).is_err());
    }

    #[test]
    fn analysis_type_and_location_name() {
        assert!(validate_analysis_type(None).is_ok());
        assert!(validate_analysis_type(Some("urban_change")).is_ok());
        assert!(validate_analysis_type(Some("deforestation")).is_err());

        assert_eq!(validate_location_name(Some("  Dubai ")).unwrap(), "Dubai");
        assert!(validate_location_name(Some("   ")).is_err());
        assert!(validate_location_name(None).is_err());
        assert!(validate_location_name(Some(&"x".repeat(201))).is_err());
    }
}
