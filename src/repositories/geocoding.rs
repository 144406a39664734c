use crate::errors::AppError;
use crate::models::Coordinates;
use async_trait::async_trait;
use deadpool_postgres::{Object, Pool};

use super::Geocoder;

/// A free-text place split into the place itself and an optional
/// trailing qualifier, e.g. `"Dubai, UAE"` -> (`Dubai`, `UAE`).
#[derive(Debug, PartialEq, Eq)]
pub struct PlaceQuery {
    pub name: String,
    pub qualifier: Option<String>,
}

impl PlaceQuery {
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty());
        let name = parts.next()?.to_string();
        // Only the last component is a useful country hint; anything in
        // between ("Dubai, Dubai, UAE") is admin noise.
        let qualifier = parts.last().map(str::to_string);
        Some(Self { name, qualifier })
    }
}

pub struct GeocodingRepository;

impl GeocodingRepository {
    /// Best gazetteer match for a place name. A qualifier that matches the
    /// country (name, ISO-2 or ISO-3) ranks a candidate first but does not
    /// exclude the others, so informal hints like "UAE" still resolve.
    pub async fn forward_geocode(
        client: &Object,
        place: &PlaceQuery,
    ) -> Result<Option<Coordinates>, AppError> {
        let sql = r#"
            SELECT g.latitude, g.longitude
            FROM geonames g
            LEFT JOIN countries c ON c.iso_a2 = g.country_code
            WHERE LOWER(g.name) = LOWER($1)
            ORDER BY
                CASE WHEN $2::text IS NOT NULL AND (
                        LOWER(c.name) = LOWER($2)
                        OR UPPER(TRIM(c.iso_a2)) = UPPER($2)
                        OR UPPER(TRIM(c.iso_a3)) = UPPER($2)
                     ) THEN 0 ELSE 1 END,
                CASE g.feature_code
                    WHEN 'PPLC' THEN 0
                    WHEN 'PPLA' THEN 1
                    WHEN 'PPLA2' THEN 2
                    WHEN 'PPL' THEN 3
                    ELSE 4
                END,
                g.geonameid
            LIMIT 1
        "#;

        let row = client
            .query_opt(sql, &[&place.name, &place.qualifier])
            .await?;

        Ok(row.map(|r| Coordinates {
            lat: r.get(0),
            lon: r.get(1),
        }))
    }
}

/// [`Geocoder`] over the GeoNames tables behind a connection pool.
pub struct GazetteerGeocoder {
    pool: Pool,
}

impl GazetteerGeocoder {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Geocoder for GazetteerGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, AppError> {
        let Some(place) = PlaceQuery::parse(name) else {
            return Ok(None);
        };
        let client = self.pool.get().await?;
        client
            .execute("SET statement_timeout = '10s'", &[])
            .await
            .ok();
        GeocodingRepository::forward_geocode(&client, &place).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        assert_eq!(
            PlaceQuery::parse("Dubai"),
            Some(PlaceQuery { name: "Dubai".into(), qualifier: None })
        );
    }

    #[test]
    fn name_with_country_hint() {
        assert_eq!(
            PlaceQuery::parse(" Dubai ,  UAE "),
            Some(PlaceQuery { name: "Dubai".into(), qualifier: Some("UAE".into()) })
        );
        assert_eq!(
            PlaceQuery::parse("Springfield, Illinois, USA"),
            Some(PlaceQuery { name: "Springfield".into(), qualifier: Some("USA".into()) })
        );
    }

    #[test]
    fn blank_input() {
        assert_eq!(PlaceQuery::parse(""), None);
        assert_eq!(PlaceQuery::parse(" , ,"), None);
    }
}
