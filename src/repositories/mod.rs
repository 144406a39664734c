pub(crate) mod geocoding;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::Coordinates;

pub(crate) use geocoding::GazetteerGeocoder;

/// Resolves a free-text place name to a coordinate pair.
#[async_trait]
pub(crate) trait Geocoder: Send + Sync {
    /// `Ok(None)` when nothing matches; `Err` only for backend failures.
    async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, AppError>;
}
