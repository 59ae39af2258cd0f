//! Built-in statistics datasets, embedded at compile time.
//!
//! Each `.toml` file in `packages/stats/data/` is one year's dataset, baked
//! into the binary via [`include_str!`]. Adding a year means adding a file
//! and an entry below.

use crate::{StatisticsTable, parse_year_toml};

/// Number of embedded years. Enforced by a test.
#[cfg(test)]
const EXPECTED_YEAR_COUNT: usize = 3;

/// Embedded `(name, toml)` datasets.
const STATS_TOMLS: &[(&str, &str)] = &[
    ("2020", include_str!("../data/2020.toml")),
    ("2021", include_str!("../data/2021.toml")),
    ("2022", include_str!("../data/2022.toml")),
];

/// Returns a table over all built-in datasets.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse or the datasets
/// conflict. These are compile-time constants, so a failure indicates a
/// development error and is caught by the tests.
#[must_use]
pub fn embedded() -> StatisticsTable {
    let datasets = STATS_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_year_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse statistics '{name}': {e}"))
        })
        .collect();

    StatisticsTable::new(datasets)
        .unwrap_or_else(|e| panic!("Embedded statistics are inconsistent: {e}"))
}

impl StatisticsTable {
    /// Table over the built-in datasets. See [`embedded`].
    #[must_use]
    pub fn embedded() -> Self {
        embedded()
    }
}
