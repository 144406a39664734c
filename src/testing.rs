//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::engine::{AnalysisEngine, AnalysisQuery, ChangeReport, EngineError, EngineOutcome, EngineResult};
use crate::errors::AppError;
use crate::imagery::fixtures::PNG_1X1;
use crate::imagery::EncodedImage;
use crate::models::{AcquisitionDates, ChangeStatistics, Coordinates, ImageSet};
use crate::repositories::Geocoder;

pub(crate) fn dubai() -> Coordinates {
    Coordinates { lat: 25.2048, lon: 55.2708 }
}

pub(crate) struct FakeGeocoder {
    places: HashMap<String, Coordinates>,
    lookups: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with_dubai() -> Self {
        let mut places = HashMap::new();
        places.insert("dubai".to_string(), dubai());
        places.insert("dubai, uae".to_string(), dubai());
        Self {
            places,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.places.get(&name.to_lowercase()).copied())
    }
}

enum Mode {
    Completed,
    Unsuccessful(String),
    Failing,
}

/// Records every query it receives and answers according to its mode.
pub(crate) struct RecordingEngine {
    mode: Mode,
    calls: Mutex<Vec<AnalysisQuery>>,
}

impl RecordingEngine {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn completed() -> Self {
        Self::with_mode(Mode::Completed)
    }

    pub fn unsuccessful(message: &str) -> Self {
        Self::with_mode(Mode::Unsuccessful(message.to_string()))
    }

    pub fn failing() -> Self {
        Self::with_mode(Mode::Failing)
    }

    pub fn calls(&self) -> Vec<AnalysisQuery> {
        self.calls.lock().unwrap().clone()
    }
}

pub(crate) fn sample_report() -> ChangeReport {
    let png = EncodedImage::from_bytes(PNG_1X1).unwrap();
    ChangeReport {
        dates: AcquisitionDates {
            before: "2020-03-14".into(),
            after: "2023-11-02".into(),
        },
        statistics: ChangeStatistics {
            changed_pixels: 1834,
            change_percentage: 12.5,
        },
        images: ImageSet {
            before: png.clone(),
            after: png.clone(),
            overlay: png,
        },
        summary: "Significant construction detected.".into(),
    }
}

#[async_trait]
impl AnalysisEngine for RecordingEngine {
    async fn analyze_change(&self, query: &AnalysisQuery) -> EngineResult<EngineOutcome> {
        self.calls.lock().unwrap().push(*query);
        match &self.mode {
            Mode::Completed => Ok(EngineOutcome::Completed(sample_report())),
            Mode::Unsuccessful(msg) => Ok(EngineOutcome::Unsuccessful(msg.clone())),
            Mode::Failing => Err(EngineError::Status {
                status: 502,
                body: "upstream imagery provider timed out".into(),
            }),
        }
    }
}
