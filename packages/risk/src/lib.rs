#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route risk engine.
//!
//! Turns a route polyline and a statistics year into a per-segment risk
//! overlay and an aggregate 0-100 safety score. Each segment takes the
//! incident total of the region its start point falls in; the score
//! averages normalized totals over a stride sample of the route's points.
//!
//! The engine owns an immutable [`RegionResolver`] and [`StatisticsTable`].
//! Scoring is pure: no I/O, no randomness, no shared mutable state, so one
//! engine can serve concurrent callers.

pub mod overlay;
pub mod route_geojson;
pub mod scoring;

use geo::{Distance as _, Haversine, Point};
use safe_route_region::RegionResolver;
use safe_route_region_models::Coordinate;
use safe_route_risk_models::{
    HeatPoint, RiskLevel, RouteAssessment, RouteScore, RouteSegment, RouteSummary, TravelMode,
};
use safe_route_stats::{IncidentRecord, StatisticsTable, StatsYear, YearStatistics};

/// Errors returned by the risk engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiskError {
    /// The route is too short or contains a non-finite coordinate.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// No statistics are loaded for the requested year.
    #[error("Unknown statistics year: {0}")]
    UnknownYear(StatsYear),
}

/// Scores routes against a fixed region table and statistics table.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    resolver: RegionResolver,
    stats: StatisticsTable,
}

/// What a single coordinate resolved to.
struct PointLookup<'a> {
    region: Option<&'a str>,
    record: Option<&'a IncidentRecord>,
}

impl RiskEngine {
    /// Creates an engine over the given configuration.
    #[must_use]
    pub fn new(resolver: RegionResolver, stats: StatisticsTable) -> Self {
        log::info!(
            "Risk engine ready: {} regions, statistics years [{}]",
            resolver.len(),
            stats
                .years()
                .map(|year| year.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { resolver, stats }
    }

    /// Engine over the built-in region table and statistics.
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(RegionResolver::embedded(), StatisticsTable::embedded())
    }

    /// The region table.
    #[must_use]
    pub const fn resolver(&self) -> &RegionResolver {
        &self.resolver
    }

    /// The statistics table.
    #[must_use]
    pub const fn statistics(&self) -> &StatisticsTable {
        &self.stats
    }

    /// Name of the highest-priority region containing the coordinate.
    #[must_use]
    pub fn resolve_region(&self, coordinate: Coordinate) -> Option<&str> {
        self.resolver.resolve(coordinate)
    }

    /// Classifies every segment of the route and computes its aggregate
    /// score.
    ///
    /// Returns exactly `coordinates.len() - 1` segments, in route order.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InvalidArgument`] if fewer than two coordinates are
    ///   given or any coordinate is not finite
    /// * [`RiskError::UnknownYear`] if `year` has no statistics
    pub fn score_route(
        &self,
        coordinates: &[Coordinate],
        year: StatsYear,
    ) -> Result<(Vec<RouteSegment>, RouteScore), RiskError> {
        validate_route(coordinates)?;
        let stats = self.year_stats(year)?;

        let segments = self.classify_segments(stats, coordinates);
        let score = self.aggregate_score(stats, coordinates);

        Ok((segments, score))
    }

    /// [`Self::score_route`] plus distance, ETA, and heatmap points.
    ///
    /// # Errors
    ///
    /// Same as [`Self::score_route`].
    pub fn assess_route(
        &self,
        coordinates: &[Coordinate],
        year: StatsYear,
        travel_mode: TravelMode,
    ) -> Result<RouteAssessment, RiskError> {
        let (segments, score) = self.score_route(coordinates, year)?;
        let stats = self.year_stats(year)?;

        let heat_points = coordinates
            .iter()
            .map(|&coordinate| {
                let record = self.lookup(stats, coordinate).record;
                let intensity = record.map_or(0.0, |r| {
                    scoring::heat_intensity(r.total_incidents, stats.max_total_incidents())
                });
                HeatPoint {
                    coordinate,
                    intensity,
                }
            })
            .collect();

        Ok(RouteAssessment {
            segments,
            score,
            summary: summarize(coordinates, travel_mode),
            heat_points,
        })
    }

    fn year_stats(&self, year: StatsYear) -> Result<&YearStatistics, RiskError> {
        self.stats.year(year).ok_or(RiskError::UnknownYear(year))
    }

    fn lookup<'a>(
        &'a self,
        stats: &'a YearStatistics,
        coordinate: Coordinate,
    ) -> PointLookup<'a> {
        let region = self.resolver.resolve(coordinate);
        PointLookup {
            region,
            record: region.and_then(|name| stats.record(name)),
        }
    }

    fn classify_segments(
        &self,
        stats: &YearStatistics,
        coordinates: &[Coordinate],
    ) -> Vec<RouteSegment> {
        coordinates
            .windows(2)
            .map(|pair| {
                let (start, end) = (pair[0], pair[1]);
                let point = self.lookup(stats, start);
                let total = point.record.map(|r| r.total_incidents);
                let risk = total.map_or(RiskLevel::Low, scoring::classify_incidents);
                let estimated_incidents = total.map_or(0, scoring::estimate_incidents);

                RouteSegment {
                    start,
                    end,
                    risk,
                    estimated_incidents,
                    region: point.region.map(str::to_string),
                }
            })
            .collect()
    }

    fn aggregate_score(&self, stats: &YearStatistics, coordinates: &[Coordinate]) -> RouteScore {
        let max_total = stats.max_total_incidents();
        let contributions: Vec<i64> = scoring::sample_indices(coordinates.len())
            .filter_map(|i| self.lookup(stats, coordinates[i]).record)
            .map(|r| scoring::contribution(r.total_incidents, max_total))
            .collect();

        scoring::aggregate(&contributions)
    }
}

/// Rejects routes the engine cannot score.
fn validate_route(coordinates: &[Coordinate]) -> Result<(), RiskError> {
    if coordinates.len() < 2 {
        return Err(RiskError::InvalidArgument {
            message: format!(
                "a route needs at least 2 coordinates, got {}",
                coordinates.len()
            ),
        });
    }

    if let Some(index) = coordinates.iter().position(|c| !c.is_finite()) {
        let c = coordinates[index];
        return Err(RiskError::InvalidArgument {
            message: format!(
                "coordinate {index} is not finite (lat {}, lng {})",
                c.lat, c.lng
            ),
        });
    }

    Ok(())
}

/// Haversine length of the polyline and the ETA for `travel_mode`.
fn summarize(coordinates: &[Coordinate], travel_mode: TravelMode) -> RouteSummary {
    let distance_meters: f64 = coordinates
        .windows(2)
        .map(|pair| {
            Haversine.distance(
                Point::new(pair[0].lng, pair[0].lat),
                Point::new(pair[1].lng, pair[1].lat),
            )
        })
        .sum();

    let eta_minutes = distance_meters / 1_000.0 / travel_mode.average_speed_kmh() * 60.0;

    RouteSummary {
        distance_meters,
        travel_mode,
        eta_minutes,
    }
}
