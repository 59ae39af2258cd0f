#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate to region attribution.
//!
//! Regions are rectangles checked in a fixed priority order: the first box
//! containing a point names its region. Boxes may overlap, which is how a
//! small territory nested inside a larger region's box is expressed (list
//! it first). A point outside every box has no region, which is an
//! ordinary outcome rather than an error.
//!
//! The built-in table is embedded at compile time from `data/regions.toml`
//! (see [`registry`]); alternative tables can be loaded from TOML with
//! [`RegionResolver::from_toml_str`] or [`RegionResolver::from_path`].

pub mod registry;
mod resolver;

pub use resolver::RegionResolver;
pub use safe_route_region_models::{BoundingBox, Coordinate, RegionDefinition};

use serde::Deserialize;

/// Errors that can occur while building a region table.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// Reading a region file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The region file is not valid TOML or has the wrong shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A region's name or bounds are unusable.
    #[error("Invalid region '{name}': {message}")]
    InvalidDefinition {
        /// Name of the offending region (may be empty).
        name: String,
        /// Description of what went wrong.
        message: String,
    },

    /// Two regions share a name.
    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),
}

/// On-disk shape of a region table: an ordered `[[regions]]` array.
#[derive(Debug, Deserialize)]
struct RegionTable {
    regions: Vec<RegionDefinition>,
}

/// Parses a TOML region table into definitions, preserving file order.
///
/// # Errors
///
/// Returns [`RegionError::Toml`] if the document cannot be parsed.
pub fn parse_regions_toml(toml_str: &str) -> Result<Vec<RegionDefinition>, RegionError> {
    let table: RegionTable = toml::de::from_str(toml_str)?;
    Ok(table.regions)
}

/// Checks a single definition for an empty name or bad bounds.
fn validate_definition(def: &RegionDefinition) -> Result<(), RegionError> {
    let invalid = |message: &str| RegionError::InvalidDefinition {
        name: def.name.clone(),
        message: message.to_string(),
    };

    if def.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if !def.bounds.is_finite() {
        return Err(invalid("bounds must be finite"));
    }
    if !def.bounds.is_ordered() {
        return Err(invalid("minimum bounds exceed maximum bounds"));
    }
    Ok(())
}
