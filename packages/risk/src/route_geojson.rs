//! Reads route polylines out of `GeoJSON` documents.
//!
//! Accepts a bare `LineString` geometry, a `Feature` wrapping one, or a
//! `FeatureCollection` (the first `LineString` feature wins, which is how
//! directions services return the primary route). A `MultiLineString` is
//! flattened in order.

use geojson::GeoJson;
use safe_route_region_models::Coordinate;

/// Errors from [`parse_route`].
#[derive(Debug, thiserror::Error)]
pub enum RouteGeoJsonError {
    /// The input is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The document holds no line geometry.
    #[error("No LineString geometry found in GeoJSON document")]
    NoLineString,
}

impl From<geojson::Error> for RouteGeoJsonError {
    fn from(e: geojson::Error) -> Self {
        Self::GeoJson(Box::new(e))
    }
}

/// Parses a `GeoJSON` document into route coordinates, in order.
///
/// Positions are `[lng, lat]` per `GeoJSON`; the returned coordinates are
/// ordinary lat/lng values. Length and finiteness are not checked here;
/// the engine validates the route when it is scored.
///
/// # Errors
///
/// * If the document does not parse as `GeoJSON`
/// * If it contains no `LineString` or `MultiLineString` geometry
pub fn parse_route(geojson_str: &str) -> Result<Vec<Coordinate>, RouteGeoJsonError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let geometries: Vec<geojson::Geometry> = match geojson {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|f| f.geometry)
            .collect(),
    };

    for geometry in geometries {
        let geo_geometry: geo::Geometry<f64> = geometry.try_into()?;
        let coords = match geo_geometry {
            geo::Geometry::LineString(line) => line.0,
            geo::Geometry::MultiLineString(lines) => {
                lines.0.into_iter().flat_map(|line| line.0).collect()
            }
            _ => continue,
        };
        return Ok(coords
            .into_iter()
            .map(|c| Coordinate::new(c.y, c.x))
            .collect());
    }

    Err(RouteGeoJsonError::NoLineString)
}
