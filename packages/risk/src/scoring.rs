//! Pure arithmetic behind segment classification and route scoring.
//!
//! Everything here is a function of plain numbers so each rule can be
//! tested in isolation from region lookup.

use safe_route_risk_models::{RiskLevel, RouteScore};

/// Score used when no sampled point has statistics.
pub const NEUTRAL_SCORE: u8 = 72;

/// Regional incidents represented by one estimated incident on a segment.
pub const INCIDENTS_PER_SEGMENT_ESTIMATE: u64 = 5_000;

/// Roughly how many points the aggregate score samples.
pub const TARGET_SAMPLE_COUNT: usize = 10;

/// Risk level of a segment whose start point lies in a region with this
/// many incidents.
#[must_use]
pub const fn classify_incidents(total_incidents: u64) -> RiskLevel {
    RiskLevel::from_incidents(total_incidents)
}

/// `round(total / 5000)`, rounding halves up.
#[must_use]
pub const fn estimate_incidents(total_incidents: u64) -> u64 {
    let whole = total_incidents / INCIDENTS_PER_SEGMENT_ESTIMATE;
    let rest = total_incidents % INCIDENTS_PER_SEGMENT_ESTIMATE;
    if rest * 2 >= INCIDENTS_PER_SEGMENT_ESTIMATE {
        whole + 1
    } else {
        whole
    }
}

/// Sampling stride for a route of `len` points: `max(1, len / 10)`.
#[must_use]
pub const fn sample_stride(len: usize) -> usize {
    let stride = len / TARGET_SAMPLE_COUNT;
    if stride == 0 { 1 } else { stride }
}

/// Indices sampled for the aggregate score: `0, k, 2k, ...` below `len`.
///
/// The last point is only included when the stride lands on it.
pub fn sample_indices(len: usize) -> impl Iterator<Item = usize> {
    (0..len).step_by(sample_stride(len))
}

/// One sampled point's contribution: `round((1 - total / max) * 100)`.
///
/// A year whose highest total is zero has no incidents anywhere, so every
/// point contributes 100.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn contribution(total_incidents: u64, max_total_incidents: u64) -> i64 {
    if max_total_incidents == 0 {
        return 100;
    }
    let ratio = total_incidents as f64 / max_total_incidents as f64;
    ((1.0 - ratio) * 100.0).round() as i64
}

/// Averages contributions into a clamped score, or [`NEUTRAL_SCORE`] when
/// there are none.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn aggregate(contributions: &[i64]) -> RouteScore {
    if contributions.is_empty() {
        return RouteScore::new(NEUTRAL_SCORE);
    }
    let sum: i64 = contributions.iter().sum();
    let mean = (sum as f64 / contributions.len() as f64).round();
    RouteScore::new(mean.clamp(0.0, 100.0) as u8)
}

/// Heatmap weight: `total / max` in `0.0..=1.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn heat_intensity(total_incidents: u64, max_total_incidents: u64) -> f64 {
    if max_total_incidents == 0 {
        return 0.0;
    }
    (total_incidents as f64 / max_total_incidents as f64).clamp(0.0, 1.0)
}
