//! Aquifer REST API
//!
//! HTTP API layer for Aquifer, built with Axum.
//!
//! # Endpoints
//!
//! ## Catalog
//! - `GET /api/v1/stations?bucket=` - List stations in a bucket
//! - `GET /api/v1/stations/:id` - Station detail
//! - `GET /api/v1/stations/:id/sensors` - Sensors of a station
//! - `GET /api/v1/stations/:id/parameters` - Parameters of a station
//! - `GET /api/v1/stations/:id/groups` - Parameter groups of a station
//! - `GET /api/v1/stations/:id/group-parameters` - Group membership
//! - `GET /api/v1/stations/:id/group-parameters/:group_id` - One group's parameters
//! - `GET /api/v1/stations/:id/qc-levels` - QC levels of a station
//! - `GET /api/v1/sensors/:id/parameters` - Parameters of a sensor
//! - `GET /api/v1/sensors/:id/groups` - Groups of a sensor
//! - `GET /api/v1/frequencies` - Frequencies of a (sensor, parameter)
//! - `GET /api/v1/stations/:id/groups/:group_id/frequencies` - Group frequencies
//!
//! ## Measurements
//! - `GET /api/v1/measurements/:resolution` - Single-parameter rollups
//! - `GET /api/v1/profile-measurements/:resolution` - Profile rollups
//! - `GET /api/v1/stations/:id/groups/:group_id/measurements/:resolution` - Group rows
//! - `GET /api/v1/stations/:id/groups/:group_id/measurements/:resolution/chart` - Chart series
//! - `GET /api/v1/stations/:id/groups/:group_id/measurements/auto` - Adaptive resolution
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Station catalog
        .route("/stations", get(routes::stations::list_stations))
        .route("/stations/:station_id", get(routes::stations::get_station))
        .route(
            "/stations/:station_id/sensors",
            get(routes::stations::station_sensors),
        )
        .route(
            "/stations/:station_id/parameters",
            get(routes::stations::station_parameters),
        )
        .route(
            "/stations/:station_id/groups",
            get(routes::stations::station_groups),
        )
        .route(
            "/stations/:station_id/group-parameters",
            get(routes::stations::station_group_parameters),
        )
        .route(
            "/stations/:station_id/group-parameters/:group_id",
            get(routes::stations::station_group_parameters_for_group),
        )
        .route(
            "/stations/:station_id/qc-levels",
            get(routes::stations::station_qc_levels),
        )
        .route(
            "/stations/:station_id/groups/:group_id/frequencies",
            get(routes::stations::station_group_frequencies),
        )
        // Sensor catalog
        .route(
            "/sensors/:sensor_id/parameters",
            get(routes::sensors::sensor_parameters),
        )
        .route(
            "/sensors/:sensor_id/groups",
            get(routes::sensors::sensor_groups),
        )
        .route("/frequencies", get(routes::sensors::parameter_frequencies))
        // Sensor measurements
        .route(
            "/measurements/:resolution",
            get(routes::measurements::single_measurements),
        )
        .route(
            "/profile-measurements/:resolution",
            get(routes::measurements::profile_measurements),
        )
        // Group measurements
        .route(
            "/stations/:station_id/groups/:group_id/measurements/auto",
            get(routes::groups::group_auto),
        )
        .route(
            "/stations/:station_id/groups/:group_id/measurements/:resolution",
            get(routes::groups::group_measurements),
        )
        .route(
            "/stations/:station_id/groups/:group_id/measurements/:resolution/chart",
            get(routes::groups::group_chart),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Aquifer API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Aquifer API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Row};
    use crate::time::{DAY_MS, HOUR_MS};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, Datelike, Utc};
    use serde_json::Value as Json;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    struct Fixture {
        router: Router,
        station: Uuid,
        group: Uuid,
        sensor: Uuid,
        parameter: Uuid,
        now_ms: i64,
    }

    fn year_of(ts: i64) -> i32 {
        DateTime::from_timestamp_millis(ts).unwrap().year()
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let station = Uuid::new_v4();
        let group = Uuid::new_v4();
        let sensor = Uuid::new_v4();
        let parameter = Uuid::new_v4();
        let now_ms = Utc::now().timestamp_millis();

        store.insert(
            "stations",
            Row::new().with("bucket", 0).with("id", station).with("name", "Falls Creek"),
        );
        store.insert(
            "station_info_by_station",
            Row::new().with("id", station).with("name", "Falls Creek"),
        );
        store.insert(
            "sensors_by_station",
            Row::new().with("station_id", station).with("sensor_id", sensor),
        );
        store.insert(
            "group_measurement_frequencies_by_station",
            Row::new()
                .with("station_id", station)
                .with("group_id", group)
                .with(
                    "measurement_frequencies",
                    vec!["Hourly".to_string(), "Daily".to_string()],
                ),
        );

        // Hourly group rollups covering the last 3 days
        for i in 0..72i64 {
            let ts = now_ms - i * HOUR_MS;
            store.insert(
                "hourly_group_measurements_by_station",
                Row::new()
                    .with("station_id", station)
                    .with("group_id", group)
                    .with("qc_level", 1)
                    .with("year", year_of(ts))
                    .with("parameter_id", parameter)
                    .with_timestamp("timestamp", ts)
                    .with("unit", "m3/s")
                    .with("avg_value", i as f64)
                    .with("min_value", i as f64 - 0.5)
                    .with("max_value", i as f64 + 0.5),
            );
        }

        // Daily single-parameter rollups covering the last 30 days; both the
        // plain and the suffixed value columns exist in the schema
        for i in 0..30i64 {
            let ts = now_ms - i * DAY_MS;
            store.insert(
                "daily_single_measurements_by_sensor",
                Row::new()
                    .with("sensor_id", sensor)
                    .with("parameter_id", parameter)
                    .with("qc_level", 1)
                    .with("year", year_of(ts))
                    .with_timestamp("timestamp", ts)
                    .with("unit", "degC")
                    .with("min", i as f64 - 1.0)
                    .with("avg", i as f64)
                    .with("max", i as f64 + 1.0)
                    .with("min_value", i as f64 - 1.0)
                    .with("avg_value", i as f64)
                    .with("max_value", i as f64 + 1.0),
            );
        }

        let state = AppState::new(Arc::new(store), ApiConfig::default());
        Fixture {
            router: build_router(state),
            station,
            group,
            sensor,
            parameter,
            now_ms,
        }
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Json) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Json::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let f = fixture();
        let (status, _) = get_json(f.router.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = get_json(f.router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_stations() {
        let f = fixture();
        let (status, body) = get_json(f.router, "/api/v1/stations?bucket=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Falls Creek");
    }

    #[tokio::test]
    async fn test_unknown_station_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/stations/{}", Uuid::new_v4());
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_single_measurements_default_columns() {
        let f = fixture();
        let uri = format!(
            "/api/v1/measurements/daily?sensor_id={}&parameter_id={}&qc_level=1&from_timestamp={}&to_timestamp={}",
            f.sensor,
            f.parameter,
            f.now_ms - 10 * DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 11);
        // Default selection carries plain min/avg/max, not the suffixed set
        assert!(rows[0].get("avg").is_some());
        assert!(rows[0].get("avg_value").is_none());
    }

    #[tokio::test]
    async fn test_single_measurements_requested_data_sets() {
        let f = fixture();
        let uri = format!(
            "/api/v1/measurements/daily?sensor_id={}&parameter_id={}&qc_level=1&from_timestamp={}&to_timestamp={}&data_sets=avg",
            f.sensor,
            f.parameter,
            f.now_ms - 5 * DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert!(!rows.is_empty());
        assert!(rows[0].get("avg_value").is_some());
        assert!(rows[0].get("min_value").is_none());
        assert!(rows[0].get("avg").is_none());
    }

    #[tokio::test]
    async fn test_unknown_resolution_is_400() {
        let f = fixture();
        let uri = format!(
            "/api/v1/measurements/2min?sensor_id={}&parameter_id={}&qc_level=1",
            f.sensor, f.parameter,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_inverted_window_is_400() {
        let f = fixture();
        let uri = format!(
            "/api/v1/measurements/daily?sensor_id={}&parameter_id={}&qc_level=1&from_timestamp={}&to_timestamp={}",
            f.sensor,
            f.parameter,
            f.now_ms,
            f.now_ms - DAY_MS,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_adaptive_group_measurements_pick_hourly() {
        let f = fixture();
        // 3-day span with {Hourly, Daily} available resolves to hourly rows
        let uri = format!(
            "/api/v1/stations/{}/groups/{}/measurements/auto?qc_level=1&from_timestamp={}&to_timestamp={}",
            f.station,
            f.group,
            f.now_ms - 3 * DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 72);
    }

    #[tokio::test]
    async fn test_adaptive_chart_format() {
        let f = fixture();
        let uri = format!(
            "/api/v1/stations/{}/groups/{}/measurements/auto?qc_level=1&from_timestamp={}&to_timestamp={}&format=chart",
            f.station,
            f.group,
            f.now_ms - 3 * DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);

        let series = body.as_object().unwrap();
        assert_eq!(series.len(), 1);
        let entry = series.get(&f.parameter.to_string()).unwrap();
        assert_eq!(entry["qc_level"], 1);
        assert_eq!(entry["averages"].as_array().unwrap().len(), 72);
    }

    #[tokio::test]
    async fn test_adaptive_with_no_frequencies_is_empty_ok() {
        let f = fixture();
        // Unknown group: no frequency declarations, explicit empty result
        let uri = format!(
            "/api/v1/stations/{}/groups/{}/measurements/auto?qc_level=1&from_timestamp={}&to_timestamp={}",
            f.station,
            Uuid::new_v4(),
            f.now_ms - DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fixed_resolution_group_chart() {
        let f = fixture();
        let uri = format!(
            "/api/v1/stations/{}/groups/{}/measurements/hourly/chart?qc_level=1&from_timestamp={}&to_timestamp={}",
            f.station,
            f.group,
            f.now_ms - 2 * DAY_MS,
            f.now_ms,
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_group_frequency_catalog() {
        let f = fixture();
        let uri = format!(
            "/api/v1/stations/{}/groups/{}/frequencies",
            f.station, f.group
        );
        let (status, body) = get_json(f.router, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body[0]["measurement_frequencies"],
            serde_json::json!(["Hourly", "Daily"])
        );
    }
}
