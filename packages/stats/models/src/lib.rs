#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Yearly per-region incident statistics types.
//!
//! An [`IncidentRecord`] holds one region's totals for one year. Records are
//! grouped into a [`YearDataset`], which is the unit a statistics file
//! describes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A statistics year (e.g. 2022).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsYear(pub u16);

impl StatsYear {
    /// Returns the numeric year.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for StatsYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatsYear {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Error returned when a string is not a four-digit year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearError {
    /// The rejected input.
    pub input: String,
}

impl std::fmt::Display for InvalidYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year '{}': expected a four-digit year",
            self.input
        )
    }
}

impl std::error::Error for InvalidYearError {}

impl FromStr for StatsYear {
    type Err = InvalidYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidYearError {
                input: s.to_string(),
            });
        }
        trimmed.parse().map(Self).map_err(|_| InvalidYearError {
            input: s.to_string(),
        })
    }
}

/// Headline incident categories reported per region.
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
pub enum IncidentCategory {
    /// Crimes against the person (assault, hurt, homicide)
    Violent,
    /// Theft, burglary, and other property offenses
    Property,
    /// Kidnapping and abduction
    Abduction,
    /// Robbery and dacoity
    Robbery,
}

impl IncidentCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Violent,
            Self::Property,
            Self::Abduction,
            Self::Robbery,
        ]
    }
}

/// Per-category incident counts. Missing categories read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryBreakdown {
    /// Violent crime count.
    pub violent: u64,
    /// Property crime count.
    pub property: u64,
    /// Abduction-related count.
    pub abduction: u64,
    /// Robbery count.
    pub robbery: u64,
}

impl CategoryBreakdown {
    /// Count for a single category.
    #[must_use]
    pub const fn count(&self, category: IncidentCategory) -> u64 {
        match category {
            IncidentCategory::Violent => self.violent,
            IncidentCategory::Property => self.property,
            IncidentCategory::Abduction => self.abduction,
            IncidentCategory::Robbery => self.robbery,
        }
    }
}

/// One region's incident statistics for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Region name, matching a region table entry.
    pub region: String,
    /// Total recorded incidents. Drives risk classification and scoring.
    pub total_incidents: u64,
    /// Headline category counts.
    #[serde(default)]
    pub breakdown: CategoryBreakdown,
}

/// All records for a single year, as read from one statistics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearDataset {
    /// The year these records describe.
    pub year: StatsYear,
    /// One record per region.
    #[serde(default)]
    pub records: Vec<IncidentRecord>,
}
