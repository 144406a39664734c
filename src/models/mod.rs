pub(crate) mod parameters;
pub(crate) mod requests;
pub(crate) mod responses;

pub(crate) use parameters::{ImageKind, Resolution, ZoomLevel};
pub(crate) use requests::{
    AnalysisRequest, ImageQuery, LocationAnalysisRequest, LocationInput, ParameterInput, TimeRange,
};
pub(crate) use responses::{
    AcquisitionDates, AnalysisResult, AppliedParameters, ChangeStatistics, Coordinates,
    HealthPayload, ImageSet, LocationCoordinatesPayload, ServicePayload,
};
