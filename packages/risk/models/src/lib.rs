#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route risk overlay, score, and assessment types.
//!
//! These are the values the risk engine hands to the presentation layer:
//! one [`RouteSegment`] per route edge for the coloured overlay, and a
//! [`RouteScore`] summarizing the whole route.

use safe_route_region_models::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Segments above this many regional incidents are [`RiskLevel::High`].
pub const HIGH_RISK_THRESHOLD: u64 = 100_000;

/// Segments above this many regional incidents (and at or below
/// [`HIGH_RISK_THRESHOLD`]) are [`RiskLevel::Medium`].
pub const MEDIUM_RISK_THRESHOLD: u64 = 50_000;

/// Scores at or above this are [`SafetyLabel::Safe`].
pub const SAFE_SCORE_MIN: u8 = 70;

/// Scores at or above this (and below [`SAFE_SCORE_MIN`]) are
/// [`SafetyLabel::Moderate`].
pub const MODERATE_SCORE_MIN: u8 = 40;

/// Risk classification of a single route segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// At most 50,000 regional incidents, or no statistics for the region
    Low,
    /// 50,001 to 100,000 regional incidents
    Medium,
    /// More than 100,000 regional incidents
    High,
}

impl RiskLevel {
    /// Classifies a regional incident total.
    #[must_use]
    pub const fn from_incidents(total_incidents: u64) -> Self {
        if total_incidents > HIGH_RISK_THRESHOLD {
            Self::High
        } else if total_incidents > MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Overlay colour used when drawing the segment.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "orange",
            Self::High => "red",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Overall verdict for a route.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyLabel {
    /// Score 70 and above
    Safe,
    /// Score 40 to 69
    Moderate,
    /// Score below 40
    HighRisk,
}

impl SafetyLabel {
    /// Labels a 0-100 score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= SAFE_SCORE_MIN {
            Self::Safe
        } else if score >= MODERATE_SCORE_MIN {
            Self::Moderate
        } else {
            Self::HighRisk
        }
    }

    /// Human-readable label shown next to the score.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Safe => "Safe Route",
            Self::Moderate => "Moderate Risk",
            Self::HighRisk => "High Risk",
        }
    }
}

/// One edge of the route with its risk annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// Edge start (the point the segment is attributed to).
    pub start: Coordinate,
    /// Edge end.
    pub end: Coordinate,
    /// Risk classification.
    pub risk: RiskLevel,
    /// Estimated incidents along the segment (regional total / 5,000,
    /// rounded). Zero when the region has no statistics.
    pub estimated_incidents: u64,
    /// Region the start point resolved to, if any.
    pub region: Option<String>,
}

/// Aggregate 0-100 safety score and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteScore {
    /// Score in `0..=100`; higher is safer.
    pub value: u8,
    /// Label derived from `value`.
    pub label: SafetyLabel,
}

impl RouteScore {
    /// Builds a score, clamping `value` to 100 and deriving its label.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        let value = if value > 100 { 100 } else { value };
        Self {
            value,
            label: SafetyLabel::from_score(value),
        }
    }
}

/// How the user is travelling. Only affects the ETA estimate.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TravelMode {
    /// On foot.
    #[default]
    Walking,
    /// Bicycle or motorbike.
    Bike,
    /// Car.
    Car,
}

impl TravelMode {
    /// Assumed average speed in km/h.
    #[must_use]
    pub const fn average_speed_kmh(self) -> f64 {
        match self {
            Self::Walking => 5.0,
            Self::Bike => 15.0,
            Self::Car => 30.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Walking, Self::Bike, Self::Car]
    }
}

/// Length and travel time for a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Great-circle length along the polyline, in metres.
    pub distance_meters: f64,
    /// Mode the ETA was computed for.
    pub travel_mode: TravelMode,
    /// Estimated travel time in minutes.
    pub eta_minutes: f64,
}

/// A weighted point for the risk heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPoint {
    /// Route point.
    pub coordinate: Coordinate,
    /// Regional total divided by the year's highest regional total, in
    /// `0.0..=1.0`. Zero when the point has no region or statistics.
    pub intensity: f64,
}

/// Everything the map view needs for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAssessment {
    /// One segment per consecutive pair of route points.
    pub segments: Vec<RouteSegment>,
    /// Aggregate score.
    pub score: RouteScore,
    /// Distance and ETA.
    pub summary: RouteSummary,
    /// One heat point per route point.
    pub heat_points: Vec<HeatPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_thresholds_are_exclusive_lower_bounds() {
        assert_eq!(RiskLevel::from_incidents(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_incidents(50_000), RiskLevel::Low);
        assert_eq!(RiskLevel::from_incidents(50_001), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_incidents(100_000), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_incidents(100_001), RiskLevel::High);
    }

    #[test]
    fn risk_colors() {
        let colors: Vec<&str> = RiskLevel::all().iter().map(|r| r.color()).collect();
        assert_eq!(colors, ["green", "orange", "red"]);
    }

    #[test]
    fn label_thresholds_are_inclusive_lower_bounds() {
        assert_eq!(SafetyLabel::from_score(100), SafetyLabel::Safe);
        assert_eq!(SafetyLabel::from_score(72), SafetyLabel::Safe);
        assert_eq!(SafetyLabel::from_score(70), SafetyLabel::Safe);
        assert_eq!(SafetyLabel::from_score(69), SafetyLabel::Moderate);
        assert_eq!(SafetyLabel::from_score(40), SafetyLabel::Moderate);
        assert_eq!(SafetyLabel::from_score(39), SafetyLabel::HighRisk);
        assert_eq!(SafetyLabel::from_score(0), SafetyLabel::HighRisk);
    }

    #[test]
    fn label_descriptions() {
        assert_eq!(SafetyLabel::Safe.description(), "Safe Route");
        assert_eq!(SafetyLabel::Moderate.description(), "Moderate Risk");
        assert_eq!(SafetyLabel::HighRisk.description(), "High Risk");
    }

    #[test]
    fn route_score_clamps_and_labels() {
        let score = RouteScore::new(250);
        assert_eq!(score.value, 100);
        assert_eq!(score.label, SafetyLabel::Safe);
        assert_eq!(RouteScore::new(0).label, SafetyLabel::HighRisk);
    }

    #[test]
    fn travel_mode_parses_case_insensitively() {
        assert_eq!("car".parse::<TravelMode>(), Ok(TravelMode::Car));
        assert_eq!("Walking".parse::<TravelMode>(), Ok(TravelMode::Walking));
        assert!("plane".parse::<TravelMode>().is_err());
        assert_eq!(TravelMode::default(), TravelMode::Walking);
    }

    #[test]
    fn segment_serializes_camel_case() {
        let segment = RouteSegment {
            start: Coordinate::new(1.0, 2.0),
            end: Coordinate::new(3.0, 4.0),
            risk: RiskLevel::High,
            estimated_incidents: 31,
            region: Some("Delhi".to_string()),
        };
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["estimatedIncidents"], 31);
        assert_eq!(json["risk"], "HIGH");
        assert_eq!(json["start"]["lat"], 1.0);
    }
}
