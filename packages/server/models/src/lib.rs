#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the safe route server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine types so the API contract can evolve on its own.

use safe_route_region_models::{BoundingBox, Coordinate, RegionDefinition};
use safe_route_risk_models::{
    HeatPoint, RiskLevel, RouteAssessment, RouteScore, RouteSegment, RouteSummary, TravelMode,
};
use safe_route_stats_models::{CategoryBreakdown, IncidentRecord, StatsYear};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// A region as listed by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegion {
    /// Position in the region table. Lower wins when boxes overlap.
    pub priority: usize,
    /// Region name.
    pub name: String,
    /// Southern latitude boundary.
    pub min_lat: f64,
    /// Northern latitude boundary.
    pub max_lat: f64,
    /// Western longitude boundary.
    pub min_lng: f64,
    /// Eastern longitude boundary.
    pub max_lng: f64,
}

impl ApiRegion {
    /// Builds the API form of a region table entry.
    #[must_use]
    pub fn new(priority: usize, definition: &RegionDefinition) -> Self {
        let BoundingBox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        } = definition.bounds;
        Self {
            priority,
            name: definition.name.clone(),
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }
}

/// Query parameters for `GET /api/regions/resolve`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResolveQuery {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl From<ResolveQuery> for Coordinate {
    fn from(query: ResolveQuery) -> Self {
        Self::new(query.lat, query.lng)
    }
}

/// Response for `GET /api/regions/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// Matching region, or `null` when the point is in no region.
    pub region: Option<String>,
}

/// Response for `GET /api/years`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearsResponse {
    /// Years with statistics, ascending.
    pub years: Vec<StatsYear>,
    /// Most recent year, if any.
    pub latest: Option<StatsYear>,
}

/// Query parameters for `GET /api/regions/{name}/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    /// Four-digit year. Defaults to the latest year with statistics.
    pub year: Option<String>,
}

/// One region's statistics for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRegionStats {
    /// Region name.
    pub region: String,
    /// Statistics year.
    pub year: StatsYear,
    /// Total recorded incidents.
    pub total_incidents: u64,
    /// Headline category counts.
    pub breakdown: CategoryBreakdown,
    /// How a segment starting in this region is classified.
    pub risk: RiskLevel,
}

impl ApiRegionStats {
    /// Builds the API form of an incident record.
    #[must_use]
    pub fn new(year: StatsYear, record: &IncidentRecord) -> Self {
        Self {
            region: record.region.clone(),
            year,
            total_incidents: record.total_incidents,
            breakdown: record.breakdown,
            risk: RiskLevel::from_incidents(record.total_incidents),
        }
    }
}

/// Body for `POST /api/routes/score` and `POST /api/routes/overlay`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRouteRequest {
    /// Route points as `[lat, lng]` pairs, in travel order.
    pub coordinates: Vec<[f64; 2]>,
    /// Four-digit statistics year.
    pub year: String,
    /// Travel mode for the ETA. Defaults to walking.
    #[serde(default)]
    pub travel_mode: Option<TravelMode>,
}

impl ScoreRouteRequest {
    /// Route points as coordinates.
    #[must_use]
    pub fn route(&self) -> Vec<Coordinate> {
        self.coordinates
            .iter()
            .copied()
            .map(Coordinate::from)
            .collect()
    }
}

/// Response for `POST /api/routes/score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRouteResponse {
    /// Statistics year the route was scored against.
    pub year: StatsYear,
    /// One segment per consecutive pair of route points.
    pub segments: Vec<RouteSegment>,
    /// Aggregate score.
    pub score: RouteScore,
    /// Display text for the score label (e.g. "Safe Route").
    pub label: String,
    /// Distance and ETA.
    pub summary: RouteSummary,
    /// Heatmap points.
    pub heat_points: Vec<HeatPoint>,
}

impl ScoreRouteResponse {
    /// Wraps an assessment for the API.
    #[must_use]
    pub fn new(year: StatsYear, assessment: RouteAssessment) -> Self {
        Self {
            year,
            label: assessment.score.label.description().to_string(),
            segments: assessment.segments,
            score: assessment.score,
            summary: assessment.summary,
            heat_points: assessment.heat_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_request_reads_lat_lng_pairs() {
        let request: ScoreRouteRequest = serde_json::from_str(
            r#"{"coordinates": [[28.61, 77.20], [28.62, 77.21]], "year": "2022", "travelMode": "car"}"#,
        )
        .unwrap();
        assert_eq!(request.travel_mode, Some(TravelMode::Car));
        assert_eq!(request.route()[0], Coordinate::new(28.61, 77.20));
        assert_eq!(request.route().len(), 2);
    }

    #[test]
    fn travel_mode_is_optional() {
        let request: ScoreRouteRequest =
            serde_json::from_str(r#"{"coordinates": [], "year": "2022"}"#).unwrap();
        assert_eq!(request.travel_mode, None);
    }

    #[test]
    fn region_is_flattened_to_camel_case() {
        let definition = RegionDefinition::new("Goa", BoundingBox::new(14.9, 15.8, 73.6, 74.4));
        let json = serde_json::to_value(ApiRegion::new(2, &definition)).unwrap();
        assert_eq!(json["priority"], 2);
        assert_eq!(json["name"], "Goa");
        assert_eq!(json["minLat"], 14.9);
        assert_eq!(json["maxLng"], 74.4);
    }

    #[test]
    fn region_stats_include_risk_level() {
        let record = IncidentRecord {
            region: "Punjab".to_string(),
            total_incidents: 75_000,
            breakdown: CategoryBreakdown::default(),
        };
        let json = serde_json::to_value(ApiRegionStats::new(StatsYear(2021), &record)).unwrap();
        assert_eq!(json["year"], 2021);
        assert_eq!(json["totalIncidents"], 75_000);
        assert_eq!(json["risk"], "MEDIUM");
    }

    #[test]
    fn unresolved_region_serializes_as_null() {
        let json = serde_json::to_value(ResolveResponse { region: None }).unwrap();
        assert!(json["region"].is_null());
    }
}
