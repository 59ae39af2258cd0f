//! Built-in region table, embedded at compile time.
//!
//! `data/regions.toml` is baked into the binary via [`include_str!`]. The
//! order of `[[regions]]` entries in that file is the lookup priority.

use crate::RegionResolver;

/// Number of regions in the built-in table. Enforced by a test.
#[cfg(test)]
const EXPECTED_REGION_COUNT: usize = 20;

/// The embedded region table.
pub const REGIONS_TOML: &str = include_str!("../data/regions.toml");

/// Returns a resolver over the built-in region table.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. The file is a compile-time
/// constant, so a failure here is a development error caught by the tests.
#[must_use]
pub fn embedded() -> RegionResolver {
    RegionResolver::from_toml_str(REGIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded regions.toml: {e}"))
}

impl RegionResolver {
    /// Resolver over the built-in region table. See [`embedded`].
    #[must_use]
    pub fn embedded() -> Self {
        embedded()
    }
}
