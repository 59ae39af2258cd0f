//! HTTP handler functions for the safe route API.

use actix_web::{HttpResponse, web};
use safe_route_risk::{RiskError, overlay};
use safe_route_server_models::{
    ApiHealth, ApiRegion, ApiRegionStats, ResolveQuery, ResolveResponse, ScoreRouteRequest,
    ScoreRouteResponse, StatsQuery, YearsResponse,
};
use safe_route_stats::StatsYear;

use crate::{ApiError, AppState};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/years`
pub async fn years(state: web::Data<AppState>) -> HttpResponse {
    let statistics = state.engine.statistics();
    HttpResponse::Ok().json(YearsResponse {
        years: statistics.years().collect(),
        latest: statistics.latest_year(),
    })
}

/// `GET /api/regions`
///
/// Lists the region table in priority order.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    let regions: Vec<ApiRegion> = state
        .engine
        .resolver()
        .regions()
        .iter()
        .enumerate()
        .map(|(priority, definition)| ApiRegion::new(priority, definition))
        .collect();

    HttpResponse::Ok().json(regions)
}

/// `GET /api/regions/resolve?lat=&lng=`
pub async fn resolve(state: web::Data<AppState>, query: web::Query<ResolveQuery>) -> HttpResponse {
    let region = state
        .engine
        .resolve_region(query.into_inner().into())
        .map(str::to_string);

    HttpResponse::Ok().json(ResolveResponse { region })
}

/// `GET /api/regions/{name}/stats?year=`
///
/// Returns one region's record. Without `year`, the latest year is used.
pub async fn region_stats(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    let statistics = state.engine.statistics();

    if state.engine.resolver().get(&name).is_none() {
        return Err(ApiError::UnknownRegion(name));
    }

    let year: StatsYear = match query.year.as_deref() {
        Some(year) => year.parse()?,
        None => statistics.latest_year().ok_or(ApiError::NoStatistics)?,
    };

    let year_stats = statistics.year(year).ok_or(RiskError::UnknownYear(year))?;
    let Some(record) = year_stats.record(&name) else {
        return Err(ApiError::MissingRecord { region: name, year });
    };

    Ok(HttpResponse::Ok().json(ApiRegionStats::new(year, record)))
}

/// `POST /api/routes/score`
///
/// Scores a route and returns its segments, score, summary, and heatmap.
pub async fn score_route(
    state: web::Data<AppState>,
    body: web::Json<ScoreRouteRequest>,
) -> Result<HttpResponse, ApiError> {
    let year: StatsYear = body.year.parse()?;
    let assessment = state.engine.assess_route(
        &body.route(),
        year,
        body.travel_mode.unwrap_or_default(),
    )?;

    let response = ScoreRouteResponse::new(year, assessment);
    Ok(HttpResponse::Ok().json(response))
}

/// `POST /api/routes/overlay`
///
/// Scores a route and returns its segments as a `GeoJSON`
/// `FeatureCollection` ready for the map.
pub async fn route_overlay(
    state: web::Data<AppState>,
    body: web::Json<ScoreRouteRequest>,
) -> Result<HttpResponse, ApiError> {
    let year: StatsYear = body.year.parse()?;
    let (segments, _score) = state.engine.score_route(&body.route(), year)?;

    let collection = overlay::segments_to_geojson(&segments);
    Ok(HttpResponse::Ok().json(collection))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use safe_route_region::{BoundingBox, RegionDefinition, RegionResolver};
    use safe_route_risk::RiskEngine;
    use safe_route_stats::{StatisticsTable, StatsYear, YearDataset};
    use serde_json::{Value, json};

    use crate::{AppState, configure};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::new(RiskEngine::embedded())))
                    .configure(configure),
            )
            .await
        };
    }

    const DELHI_ROUTE: [[f64; 2]; 3] = [[28.6139, 77.2090], [28.6200, 77.2150], [28.6300, 77.2200]];

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn years_lists_embedded_statistics() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/years").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["years"], json!([2020, 2021, 2022]));
        assert_eq!(body["latest"], 2022);
    }

    #[actix_web::test]
    async fn regions_are_in_priority_order() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/regions").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let regions = body.as_array().unwrap();
        assert_eq!(regions.len(), 20);
        assert_eq!(regions[0]["name"], "Delhi");
        assert_eq!(regions[0]["priority"], 0);
    }

    #[actix_web::test]
    async fn resolve_returns_region_or_null() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/regions/resolve?lat=28.6315&lng=77.2167")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["region"], "Delhi");

        let req = test::TestRequest::get()
            .uri("/api/regions/resolve?lat=15&lng=65")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["region"].is_null());
    }

    #[actix_web::test]
    async fn resolve_without_coordinates_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/regions/resolve?lat=28.6")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn region_stats_for_year() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/regions/Delhi/stats?year=2022")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["region"], "Delhi");
        assert_eq!(body["year"], 2022);
        assert_eq!(body["totalIncidents"], 300_429);
        assert_eq!(body["risk"], "HIGH");
    }

    #[actix_web::test]
    async fn region_stats_default_to_latest_year() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/regions/Delhi/stats")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["year"], 2022);
    }

    #[actix_web::test]
    async fn region_stats_errors() {
        let app = app!();

        let cases = [
            (
                "/api/regions/Atlantis/stats?year=2022",
                StatusCode::NOT_FOUND,
            ),
            ("/api/regions/Delhi/stats?year=1999", StatusCode::NOT_FOUND),
            ("/api/regions/Delhi/stats?year=22", StatusCode::BAD_REQUEST),
        ];

        for (uri, status) in cases {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{uri}");
        }
    }

    #[actix_web::test]
    async fn region_stats_without_record_is_not_found() {
        let resolver = RegionResolver::new(vec![RegionDefinition::new(
            "Quiet",
            BoundingBox::new(0.0, 1.0, 0.0, 1.0),
        )])
        .unwrap();
        let stats = StatisticsTable::new(vec![YearDataset {
            year: StatsYear(2022),
            records: Vec::new(),
        }])
        .unwrap();
        let engine = RiskEngine::new(resolver, stats);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(engine)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/regions/Quiet/stats")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No statistics for region 'Quiet' in 2022");
    }

    #[actix_web::test]
    async fn score_route_returns_assessment() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/routes/score")
            .set_json(json!({
                "coordinates": DELHI_ROUTE,
                "year": "2022",
                "travelMode": "car",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["year"], 2022);
        assert_eq!(body["segments"].as_array().unwrap().len(), 2);
        assert_eq!(body["segments"][0]["risk"], "HIGH");
        assert_eq!(body["segments"][0]["region"], "Delhi");
        assert_eq!(body["summary"]["travelMode"], "car");
        assert_eq!(body["heatPoints"].as_array().unwrap().len(), 3);
        let score = body["score"]["value"].as_u64().unwrap();
        assert!(score <= 100);
        assert!(body["label"].is_string());
    }

    #[actix_web::test]
    async fn score_route_over_ocean_is_neutral() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/routes/score")
            .set_json(json!({
                "coordinates": [[15.0, 65.0], [15.1, 65.1]],
                "year": "2022",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["score"]["value"], 72);
        assert_eq!(body["score"]["label"], "SAFE");
        assert_eq!(body["label"], "Safe Route");
        assert_eq!(body["summary"]["travelMode"], "walking");
    }

    #[actix_web::test]
    async fn score_route_errors() {
        let app = app!();

        let cases = [
            (
                json!({"coordinates": [[28.6, 77.2]], "year": "2022"}),
                StatusCode::BAD_REQUEST,
            ),
            (
                json!({"coordinates": DELHI_ROUTE, "year": "1999"}),
                StatusCode::NOT_FOUND,
            ),
            (
                json!({"coordinates": DELHI_ROUTE, "year": "next"}),
                StatusCode::BAD_REQUEST,
            ),
            (json!({"year": "2022"}), StatusCode::BAD_REQUEST),
        ];

        for (payload, status) in cases {
            let req = test::TestRequest::post()
                .uri("/api/routes/score")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{payload}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].is_string(), "{payload}");
        }
    }

    #[actix_web::test]
    async fn overlay_returns_feature_collection() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/routes/overlay")
            .set_json(json!({"coordinates": DELHI_ROUTE, "year": "2022"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["type"], "FeatureCollection");
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        assert_eq!(features[0]["geometry"]["coordinates"][0][0], 77.2090);
        assert_eq!(features[0]["properties"]["color"], "red");
    }
}
