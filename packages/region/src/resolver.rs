//! R-tree backed region lookup with first-match-wins semantics.

use std::collections::BTreeSet;
use std::path::Path;

use rstar::{AABB, RTree, RTreeObject};
use safe_route_region_models::{Coordinate, RegionDefinition};

use crate::{RegionError, parse_regions_toml, validate_definition};

/// A region's envelope in the R-tree, tagged with its position in the
/// priority order.
#[derive(Debug, Clone)]
struct RegionEntry {
    priority: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Resolves coordinates to region names.
///
/// Immutable once built, so a single resolver can be shared across threads
/// and queried concurrently.
#[derive(Debug, Clone)]
pub struct RegionResolver {
    /// Definitions in priority order; an entry's `priority` indexes here.
    regions: Vec<RegionDefinition>,
    index: RTree<RegionEntry>,
}

impl RegionResolver {
    /// Builds a resolver from definitions listed in priority order.
    ///
    /// # Errors
    ///
    /// * [`RegionError::InvalidDefinition`] if a name is blank or a box has
    ///   non-finite or inverted bounds
    /// * [`RegionError::DuplicateRegion`] if two definitions share a name
    pub fn new(regions: Vec<RegionDefinition>) -> Result<Self, RegionError> {
        let mut seen = BTreeSet::new();
        for def in &regions {
            validate_definition(def)?;
            if !seen.insert(def.name.as_str()) {
                return Err(RegionError::DuplicateRegion(def.name.clone()));
            }
        }

        let entries = regions
            .iter()
            .enumerate()
            .map(|(priority, def)| RegionEntry {
                priority,
                envelope: AABB::from_corners(def.bounds.lower_corner(), def.bounds.upper_corner()),
            })
            .collect();

        Ok(Self {
            index: RTree::bulk_load(entries),
            regions,
        })
    }

    /// Builds a resolver from a TOML region table.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError`] if the document fails to parse or validate.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegionError> {
        Self::new(parse_regions_toml(toml_str)?)
    }

    /// Builds a resolver from a TOML region table on disk.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_path(path: &Path) -> Result<Self, RegionError> {
        let contents = std::fs::read_to_string(path)?;
        let resolver = Self::from_toml_str(&contents)?;
        log::info!("Loaded {} regions from {}", resolver.len(), path.display());
        Ok(resolver)
    }

    /// Returns the name of the highest-priority region containing the
    /// coordinate, or `None` if no region contains it.
    ///
    /// Non-finite coordinates never match.
    #[must_use]
    pub fn resolve(&self, coordinate: Coordinate) -> Option<&str> {
        self.resolve_definition(coordinate)
            .map(|def| def.name.as_str())
    }

    /// Like [`Self::resolve`], but returns the whole definition.
    #[must_use]
    pub fn resolve_definition(&self, coordinate: Coordinate) -> Option<&RegionDefinition> {
        if !coordinate.is_finite() {
            return None;
        }

        let query_env = AABB::from_point(coordinate.to_lng_lat());

        self.index
            .locate_in_envelope_intersecting(&query_env)
            .filter(|entry| self.regions[entry.priority].bounds.contains(coordinate))
            .map(|entry| entry.priority)
            .min()
            .map(|priority| &self.regions[priority])
    }

    /// All definitions, in priority order.
    #[must_use]
    pub fn regions(&self) -> &[RegionDefinition] {
        &self.regions
    }

    /// Looks up a definition by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegionDefinition> {
        self.regions.iter().find(|def| def.name == name)
    }

    /// Number of regions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table has no regions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
