#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for route safety scoring.
//!
//! Serves region lookup, statistics, and route scoring over a JSON REST
//! API for the map frontend. One [`RiskEngine`] is built at startup from
//! the embedded datasets (or files named by environment variables) and
//! shared read-only by every worker.

mod error;
mod handlers;

pub use error::ApiError;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use safe_route_region::{RegionError, RegionResolver};
use safe_route_risk::RiskEngine;
use safe_route_stats::{StatisticsTable, StatsError};

/// Errors that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The region table could not be loaded.
    #[error("Region table error: {0}")]
    Region(#[from] RegionError),

    /// The statistics table could not be loaded.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// Region table file replacing the embedded one
    /// (`SAFE_ROUTE_REGIONS`).
    pub regions_path: Option<PathBuf>,
    /// Directory of statistics files replacing the embedded ones
    /// (`SAFE_ROUTE_STATS_DIR`).
    pub stats_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            regions_path: None,
            stats_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            regions_path: std::env::var_os("SAFE_ROUTE_REGIONS").map(PathBuf::from),
            stats_dir: std::env::var_os("SAFE_ROUTE_STATS_DIR").map(PathBuf::from),
        }
    }

    /// Builds the risk engine from the configured datasets.
    ///
    /// # Errors
    ///
    /// * If the region file cannot be read or is invalid
    /// * If the statistics directory cannot be read or is invalid
    pub fn load_engine(&self) -> Result<RiskEngine, ServerError> {
        let resolver = match &self.regions_path {
            Some(path) => RegionResolver::from_path(path)?,
            None => RegionResolver::embedded(),
        };
        let stats = match &self.stats_dir {
            Some(dir) => StatisticsTable::from_dir(dir)?,
            None => StatisticsTable::embedded(),
        };

        Ok(RiskEngine::new(resolver, stats))
    }
}

/// Shared application state. Workers share it through [`web::Data`].
pub struct AppState {
    /// Region resolver and statistics, immutable after startup.
    pub engine: RiskEngine,
}

impl AppState {
    /// Creates the state around a loaded engine.
    #[must_use]
    pub const fn new(engine: RiskEngine) -> Self {
        Self { engine }
    }
}

/// Registers the `/api` routes and JSON error handling for extractors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/years", web::get().to(handlers::years))
            .route("/regions", web::get().to(handlers::regions))
            .route("/regions/resolve", web::get().to(handlers::resolve))
            .route(
                "/regions/{name}/stats",
                web::get().to(handlers::region_stats),
            )
            .route("/routes/score", web::post().to(handlers::score_route))
            .route("/routes/overlay", web::post().to(handlers::route_overlay)),
    );
}

/// Starts the safe route API server.
///
/// Loads the datasets named by `config` and starts the Actix-Web HTTP
/// server. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// * If the region or statistics datasets fail to load
/// * If the HTTP server fails to bind or encounters a runtime error
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!("Loading region and statistics tables...");
    let state = web::Data::new(AppState::new(config.load_engine()?));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn default_config_uses_embedded_datasets() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);

        let engine = config.load_engine().unwrap();
        assert_eq!(engine.resolver().len(), 20);
        assert_eq!(engine.statistics().years().count(), 3);
    }

    #[test]
    fn app_state_holds_the_loaded_engine() {
        let engine = ServerConfig::default().load_engine().unwrap();
        let state = web::Data::new(AppState::new(engine));
        let worker = state.clone();

        assert_eq!(worker.engine.resolver().len(), 20);
        assert_eq!(
            worker.engine.statistics().latest_year(),
            state.engine.statistics().latest_year()
        );
    }

    #[test]
    fn missing_region_file_fails_to_load() {
        let config = ServerConfig {
            regions_path: Some(Path::new("does/not/exist/regions.toml").to_path_buf()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.load_engine(),
            Err(ServerError::Region(RegionError::Io(_)))
        ));
    }

    #[test]
    fn missing_stats_dir_fails_to_load() {
        let config = ServerConfig {
            stats_dir: Some(Path::new("does/not/exist").to_path_buf()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.load_engine(),
            Err(ServerError::Stats(StatsError::Io(_)))
        ));
    }
}
