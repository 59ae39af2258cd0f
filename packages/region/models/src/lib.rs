#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and region bounding box types.
//!
//! A region is a named rectangle in latitude/longitude space. Regions are
//! used to attribute a route coordinate to the administrative unit whose
//! incident statistics apply to it.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
///
/// No range validation is applied. Out-of-range values are legal and simply
/// fall outside every region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite (not `NaN` or infinite).
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Returns `[lng, lat]`, the axis order used by `GeoJSON` and R-tree
    /// envelopes.
    #[must_use]
    pub const fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    /// Interprets the array as `[lat, lng]`.
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned latitude/longitude rectangle.
///
/// Containment is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude boundary.
    pub min_lat: f64,
    /// Northern latitude boundary.
    pub max_lat: f64,
    /// Western longitude boundary.
    pub min_lng: f64,
    /// Eastern longitude boundary.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given bounds.
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Whether the coordinate lies inside the box or on its boundary.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.min_lat <= coordinate.lat
            && coordinate.lat <= self.max_lat
            && self.min_lng <= coordinate.lng
            && coordinate.lng <= self.max_lng
    }

    /// Whether all four bounds are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.min_lat.is_finite()
            && self.max_lat.is_finite()
            && self.min_lng.is_finite()
            && self.max_lng.is_finite()
    }

    /// Whether the minimum bounds do not exceed the maximum bounds.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_lng <= self.max_lng
    }

    /// South-west corner as `[lng, lat]`.
    #[must_use]
    pub const fn lower_corner(&self) -> [f64; 2] {
        [self.min_lng, self.min_lat]
    }

    /// North-east corner as `[lng, lat]`.
    #[must_use]
    pub const fn upper_corner(&self) -> [f64; 2] {
        [self.max_lng, self.max_lat]
    }
}

/// A named region as declared in a region table.
///
/// The bounds are flattened so a TOML entry reads
/// `name = "..."`, `min_lat = ...`, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    /// Region name, unique within a table (e.g. "Delhi").
    pub name: String,
    /// Rectangle covering the region.
    #[serde(flatten)]
    pub bounds: BoundingBox,
}

impl RegionDefinition {
    /// Creates a new region definition.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}
