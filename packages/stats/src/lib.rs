#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Year-keyed regional incident statistics.
//!
//! A [`StatisticsTable`] maps `(year, region)` to an [`IncidentRecord`]. It
//! is built once from one [`YearDataset`] per year and never mutated, and it
//! precomputes each year's highest regional total, which scoring uses as
//! its normalizer.

pub mod registry;

use std::collections::BTreeMap;
use std::path::Path;

pub use safe_route_stats_models::{
    CategoryBreakdown, IncidentCategory, IncidentRecord, InvalidYearError, StatsYear, YearDataset,
};

/// Errors that can occur while building a statistics table.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Reading a statistics file or directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A statistics file is not valid TOML or has the wrong shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two datasets describe the same year.
    #[error("Duplicate statistics year: {0}")]
    DuplicateYear(StatsYear),

    /// A dataset lists the same region twice.
    #[error("Duplicate record for region '{region}' in {year}")]
    DuplicateRecord {
        /// Year of the offending dataset.
        year: StatsYear,
        /// Region that appears more than once.
        region: String,
    },
}

/// Records for one year, keyed by region name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStatistics {
    year: StatsYear,
    records: BTreeMap<String, IncidentRecord>,
    max_total_incidents: u64,
}

impl YearStatistics {
    fn from_dataset(dataset: YearDataset) -> Result<Self, StatsError> {
        let year = dataset.year;
        let mut records = BTreeMap::new();

        for record in dataset.records {
            if records.contains_key(&record.region) {
                return Err(StatsError::DuplicateRecord {
                    year,
                    region: record.region,
                });
            }
            records.insert(record.region.clone(), record);
        }

        let max_total_incidents = records
            .values()
            .map(|r| r.total_incidents)
            .max()
            .unwrap_or(0);

        Ok(Self {
            year,
            records,
            max_total_incidents,
        })
    }

    /// The year these statistics describe.
    #[must_use]
    pub const fn year(&self) -> StatsYear {
        self.year
    }

    /// The record for a region, if the dataset has one.
    #[must_use]
    pub fn record(&self, region: &str) -> Option<&IncidentRecord> {
        self.records.get(region)
    }

    /// Highest `total_incidents` across all regions this year (0 if the
    /// year has no records).
    #[must_use]
    pub const fn max_total_incidents(&self) -> u64 {
        self.max_total_incidents
    }

    /// All records, ordered by region name.
    pub fn records(&self) -> impl Iterator<Item = &IncidentRecord> {
        self.records.values()
    }

    /// Number of regions with a record this year.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this year has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Immutable `(year, region) -> record` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsTable {
    years: BTreeMap<StatsYear, YearStatistics>,
}

impl StatisticsTable {
    /// Builds a table from one dataset per year.
    ///
    /// # Errors
    ///
    /// * [`StatsError::DuplicateYear`] if two datasets share a year
    /// * [`StatsError::DuplicateRecord`] if a dataset repeats a region
    pub fn new(datasets: Vec<YearDataset>) -> Result<Self, StatsError> {
        let mut years = BTreeMap::new();

        for dataset in datasets {
            let year = dataset.year;
            if years.contains_key(&year) {
                return Err(StatsError::DuplicateYear(year));
            }
            let stats = YearStatistics::from_dataset(dataset)?;
            log::debug!(
                "Statistics for {year}: {} regions, max total {}",
                stats.len(),
                stats.max_total_incidents()
            );
            years.insert(year, stats);
        }

        Ok(Self { years })
    }

    /// Loads every `*.toml` file in `dir` as one year's dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the directory cannot be read or any file
    /// fails to parse or validate.
    pub fn from_dir(dir: &Path) -> Result<Self, StatsError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut datasets = Vec::with_capacity(paths.len());
        for path in &paths {
            let contents = std::fs::read_to_string(path)?;
            let dataset = parse_year_toml(&contents)?;
            log::info!(
                "Loaded {} statistics records for {} from {}",
                dataset.records.len(),
                dataset.year,
                path.display()
            );
            datasets.push(dataset);
        }

        Self::new(datasets)
    }

    /// Statistics for a year, if present.
    #[must_use]
    pub fn year(&self, year: StatsYear) -> Option<&YearStatistics> {
        self.years.get(&year)
    }

    /// Whether the table has statistics for the year.
    #[must_use]
    pub fn contains_year(&self, year: StatsYear) -> bool {
        self.years.contains_key(&year)
    }

    /// Available years, ascending.
    pub fn years(&self) -> impl Iterator<Item = StatsYear> + '_ {
        self.years.keys().copied()
    }

    /// Most recent year in the table.
    #[must_use]
    pub fn latest_year(&self) -> Option<StatsYear> {
        self.years.keys().next_back().copied()
    }

    /// Shortcut for `self.year(year)?.record(region)`.
    #[must_use]
    pub fn record(&self, year: StatsYear, region: &str) -> Option<&IncidentRecord> {
        self.year(year)?.record(region)
    }
}

/// Parses a single year's statistics file.
///
/// # Errors
///
/// Returns [`StatsError::Toml`] if the document cannot be parsed.
pub fn parse_year_toml(toml_str: &str) -> Result<YearDataset, StatsError> {
    Ok(toml::de::from_str(toml_str)?)
}
