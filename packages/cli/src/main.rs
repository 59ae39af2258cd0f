#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for region lookup and route safety scoring.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use safe_route_region::{Coordinate, RegionResolver};
use safe_route_risk::{RiskEngine, overlay, route_geojson};
use safe_route_risk_models::{RouteAssessment, TravelMode};
use safe_route_stats::{StatisticsTable, StatsYear, YearStatistics};

#[derive(Parser)]
#[command(name = "safe_route", about = "Route safety scoring tool")]
struct Cli {
    /// Region table TOML file to use instead of the built-in table
    #[arg(long, global = true)]
    regions: Option<PathBuf>,
    /// Directory of yearly statistics TOML files to use instead of the
    /// built-in statistics
    #[arg(long, global = true)]
    stats_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List regions in priority order
    Regions,
    /// List years with statistics
    Years,
    /// Print the region containing a coordinate
    Resolve {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Score a route read from a `GeoJSON` `LineString`
    Score {
        /// `GeoJSON` file holding the route (geometry, Feature, or
        /// `FeatureCollection`)
        route: PathBuf,
        /// Statistics year (e.g. 2022). Defaults to the latest year.
        #[arg(long)]
        year: Option<StatsYear>,
        /// Travel mode for the ETA estimate (walking, bike, car)
        #[arg(long, default_value = "walking", value_parser = parse_travel_mode)]
        mode: TravelMode,
        /// Print the full assessment as JSON
        #[arg(long)]
        json: bool,
        /// Write the coloured segment overlay as `GeoJSON` to this file
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let engine = load_engine(cli.regions.as_deref(), cli.stats_dir.as_deref())?;

    match cli.command {
        Commands::Regions => {
            println!(
                "{:<4} {:<18} {:>8} {:>8} {:>8} {:>8}",
                "#", "NAME", "MIN LAT", "MAX LAT", "MIN LNG", "MAX LNG"
            );
            println!("{}", "-".repeat(60));
            for (priority, region) in engine.resolver().regions().iter().enumerate() {
                let b = region.bounds;
                println!(
                    "{priority:<4} {:<18} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                    region.name, b.min_lat, b.max_lat, b.min_lng, b.max_lng
                );
            }
        }
        Commands::Years => {
            for year in engine.statistics().years() {
                let count = engine
                    .statistics()
                    .year(year)
                    .map_or(0, YearStatistics::len);
                println!("{year} ({count} regions)");
            }
        }
        Commands::Resolve { lat, lng } => {
            match engine.resolve_region(Coordinate::new(lat, lng)) {
                Some(region) => println!("{region}"),
                None => println!("no match"),
            }
        }
        Commands::Score {
            route,
            year,
            mode,
            json,
            overlay: overlay_path,
        } => {
            let year = match year {
                Some(year) => year,
                None => engine
                    .statistics()
                    .latest_year()
                    .ok_or("No statistics years are loaded")?,
            };

            let contents = std::fs::read_to_string(&route)?;
            let coordinates = route_geojson::parse_route(&contents)?;
            log::info!(
                "Scoring {} points from {} against {year}",
                coordinates.len(),
                route.display()
            );

            let assessment = engine.assess_route(&coordinates, year, mode)?;

            if let Some(path) = overlay_path {
                let collection = overlay::segments_to_geojson(&assessment.segments);
                std::fs::write(&path, serde_json::to_string_pretty(&collection)?)?;
                log::info!("Wrote overlay to {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", format_assessment(year, &assessment));
            }
        }
    }

    Ok(())
}

fn parse_travel_mode(s: &str) -> Result<TravelMode, String> {
    s.parse().map_err(|_| {
        let modes: Vec<&str> = TravelMode::all().iter().map(TravelMode::as_ref).collect();
        let modes = modes.join(", ");
        format!("unknown travel mode '{s}', expected one of: {modes}")
    })
}

fn load_engine(
    regions: Option<&Path>,
    stats_dir: Option<&Path>,
) -> Result<RiskEngine, Box<dyn std::error::Error>> {
    let resolver = match regions {
        Some(path) => RegionResolver::from_path(path)?,
        None => RegionResolver::embedded(),
    };
    let stats = match stats_dir {
        Some(dir) => StatisticsTable::from_dir(dir)?,
        None => StatisticsTable::embedded(),
    };
    Ok(RiskEngine::new(resolver, stats))
}

/// Renders an assessment as a segment table followed by the summary.
fn format_assessment(year: StatsYear, assessment: &RouteAssessment) -> String {
    let mut out = format!("{:<5} {:<8} {:>10} REGION\n", "SEG", "RISK", "INCIDENTS");
    out.push_str(&"-".repeat(44));
    out.push('\n');
    for (i, segment) in assessment.segments.iter().enumerate() {
        out.push_str(&format!(
            "{i:<5} {:<8} {:>10} {}\n",
            segment.risk.as_ref(),
            segment.estimated_incidents,
            segment.region.as_deref().unwrap_or("-")
        ));
    }

    let summary = &assessment.summary;
    out.push('\n');
    out.push_str(&format!(
        "Safety score: {}/100 ({}), statistics year {year}\n",
        assessment.score.value,
        assessment.score.label.description()
    ));
    out.push_str(&format!(
        "Distance: {:.2} km, ETA: {:.0} min ({})\n",
        summary.distance_meters / 1_000.0,
        summary.eta_minutes,
        summary.travel_mode
    ));

    out
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_score_arguments() {
        let cli = Cli::try_parse_from([
            "safe_route",
            "score",
            "route.geojson",
            "--year",
            "2021",
            "--mode",
            "car",
            "--json",
        ])
        .unwrap();

        let Commands::Score {
            route,
            year,
            mode,
            json,
            overlay,
        } = cli.command
        else {
            panic!("expected score command");
        };
        assert_eq!(route, PathBuf::from("route.geojson"));
        assert_eq!(year, Some(StatsYear(2021)));
        assert_eq!(mode, TravelMode::Car);
        assert!(json);
        assert!(overlay.is_none());
    }

    #[test]
    fn rejects_unknown_travel_mode() {
        let err = parse_travel_mode("plane").unwrap_err();
        assert!(err.contains("walking, bike, car"), "{err}");
        let result = Cli::try_parse_from(["safe_route", "score", "r.geojson", "--mode", "plane"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_year() {
        let result = Cli::try_parse_from(["safe_route", "score", "r.geojson", "--year", "22"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_dataset_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "safe_route",
            "resolve",
            "--lat",
            "-12.5",
            "--lng",
            "130.8",
            "--stats-dir",
            "data/stats",
        ])
        .unwrap();
        assert_eq!(cli.stats_dir, Some(PathBuf::from("data/stats")));
        assert!(matches!(
            cli.command,
            Commands::Resolve { lat, .. } if (lat + 12.5).abs() < 1e-9
        ));
    }

    #[test]
    fn report_lists_segments_and_score() {
        let engine = load_engine(None, None).unwrap();
        let route = [
            Coordinate::new(28.6139, 77.2090),
            Coordinate::new(28.6200, 77.2150),
        ];
        let assessment = engine
            .assess_route(&route, StatsYear(2022), TravelMode::Walking)
            .unwrap();

        let report = format_assessment(StatsYear(2022), &assessment);
        assert!(report.contains("HIGH"), "{report}");
        assert!(report.contains("Delhi"), "{report}");
        assert!(report.contains("statistics year 2022"), "{report}");
        assert!(report.contains("(walking)"), "{report}");

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 6, "{report}");
        assert!(lines[2].starts_with("0 "), "{report}");
        assert!(lines[3].is_empty(), "{report}");
        assert!(report.ends_with('\n'));
    }
}
