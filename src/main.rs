//! Aquifer API Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Environment variables:
//! - `AQUIFER_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `AQUIFER_API_PORT`: Port to listen on (default: 8088)
//! - `AQUIFER_DEMO_DATA`: Seed the in-process store with demo data (default: true)
//! - `AQUIFER_LOG_LEVEL`: Log level (default: info)
//! - `AQUIFER_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter override

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use aquifer::api::{serve, ApiConfig, AppState};
use aquifer::config::{Config, LoggingConfig};
use aquifer::store::{MemoryStore, Row};
use aquifer::time::{DAY_MS, HOUR_MS, MINUTE_MS};

#[derive(Parser, Debug)]
#[command(name = "aquifer", about = "Environmental sensor time-series API")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Aquifer API server v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryStore::new());
    if config.store.demo_data {
        seed_demo_data(&store);
    } else {
        tracing::warn!(
            "Demo data disabled and no driver-backed session configured; \
             the store starts empty"
        );
    }

    let api_config = ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(store, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Aquifer API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("aquifer={},tower_http=info", logging.level))
    });

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn year_of(ts_ms: i64) -> i32 {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.year())
        .unwrap_or(1970)
}

/// Seed one demo station with catalog records and measurement rollups
///
/// The logged ids are the entry points for exploring the API by hand.
fn seed_demo_data(store: &MemoryStore) {
    let station_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let sensor_id = Uuid::new_v4();
    let discharge_id = Uuid::new_v4();
    let temperature_id = Uuid::new_v4();
    let now_ms = Utc::now().timestamp_millis();

    // Catalog
    store.insert(
        "stations",
        Row::new()
            .with("bucket", 0)
            .with("id", station_id)
            .with("name", "Falls Creek Gauge")
            .with("latitude", 46.873)
            .with("longitude", -113.995),
    );
    store.insert(
        "station_info_by_station",
        Row::new()
            .with("id", station_id)
            .with("name", "Falls Creek Gauge")
            .with("description", "Demo hydrology station"),
    );
    store.insert(
        "sensors_by_station",
        Row::new()
            .with("station_id", station_id)
            .with("sensor_id", sensor_id)
            .with("label", "multiprobe-1"),
    );
    store.insert(
        "parameter_groups_by_station",
        Row::new()
            .with("station_id", station_id)
            .with("group_id", group_id)
            .with("name", "hydrology"),
    );
    store.insert(
        "group_qc_levels_by_station",
        Row::new()
            .with("station_id", station_id)
            .with("group_id", group_id)
            .with("qc_levels", vec!["0".to_string(), "1".to_string()]),
    );
    for (parameter_id, name, unit) in [
        (discharge_id, "discharge", "m3/s"),
        (temperature_id, "water_temperature", "degC"),
    ] {
        store.insert(
            "parameters_by_station",
            Row::new()
                .with("station_id", station_id)
                .with("parameter_id", parameter_id)
                .with("name", name)
                .with("unit", unit),
        );
        store.insert(
            "parameters_by_sensor",
            Row::new()
                .with("sensor_id", sensor_id)
                .with("parameter_id", parameter_id)
                .with("name", name)
                .with("unit", unit),
        );
        store.insert(
            "parameters_by_station_group",
            Row::new()
                .with("station_id", station_id)
                .with("group_id", group_id)
                .with("parameter_id", parameter_id)
                .with("name", name),
        );
        store.insert(
            "measurement_frequencies_by_sensor_parameter",
            Row::new()
                .with("sensor_id", sensor_id)
                .with("parameter_id", parameter_id)
                .with("parameter_type", "single")
                .with(
                    "measurement_frequencies",
                    vec!["5 Min".to_string(), "Hourly".to_string(), "Daily".to_string()],
                ),
        );
    }
    store.insert(
        "group_parameters_by_station",
        Row::new()
            .with("station_id", station_id)
            .with("group_id", group_id)
            .with(
                "parameter_ids",
                vec![discharge_id.to_string(), temperature_id.to_string()],
            ),
    );
    store.insert(
        "group_measurement_frequencies_by_station",
        Row::new()
            .with("station_id", station_id)
            .with("group_id", group_id)
            .with(
                "measurement_frequencies",
                vec!["5 Min".to_string(), "Hourly".to_string(), "Daily".to_string()],
            ),
    );
    store.insert(
        "parameter_groups_by_sensor",
        Row::new()
            .with("sensor_id", sensor_id)
            .with("group_id", group_id)
            .with("name", "hydrology"),
    );

    // A slow seasonal swing keeps the demo charts from looking like noise
    let wave = |i: i64, period: i64| ((i % period) as f64 / period as f64) * 4.0 + 8.0;

    // Daily single-parameter rollups, last 120 days, year-partitioned
    for i in 0..120 {
        let ts = now_ms - i * DAY_MS;
        for (parameter_id, unit) in [(discharge_id, "m3/s"), (temperature_id, "degC")] {
            let avg = wave(i, 30);
            store.insert(
                "daily_single_measurements_by_sensor",
                Row::new()
                    .with("sensor_id", sensor_id)
                    .with("parameter_id", parameter_id)
                    .with("qc_level", 1)
                    .with("year", year_of(ts))
                    .with_timestamp("timestamp", ts)
                    .with("unit", unit)
                    .with("min", avg - 1.0)
                    .with("avg", avg)
                    .with("max", avg + 1.0)
                    .with("min_value", avg - 1.0)
                    .with("avg_value", avg)
                    .with("max_value", avg + 1.0),
            );
        }
    }

    // Hourly and daily group rollups, last 30 days, year-partitioned
    for i in 0..(30 * 24) {
        let ts = now_ms - i * HOUR_MS;
        let avg = wave(i, 24);
        store.insert(
            "hourly_group_measurements_by_station",
            Row::new()
                .with("station_id", station_id)
                .with("group_id", group_id)
                .with("qc_level", 1)
                .with("year", year_of(ts))
                .with("parameter_id", discharge_id)
                .with_timestamp("timestamp", ts)
                .with("unit", "m3/s")
                .with("avg_value", avg)
                .with("min_value", avg - 0.5)
                .with("max_value", avg + 0.5),
        );
    }
    for i in 0..30 {
        let ts = now_ms - i * DAY_MS;
        let avg = wave(i, 30);
        store.insert(
            "daily_group_measurements_by_station",
            Row::new()
                .with("station_id", station_id)
                .with("group_id", group_id)
                .with("qc_level", 1)
                .with("year", year_of(ts))
                .with("parameter_id", discharge_id)
                .with_timestamp("timestamp", ts)
                .with("unit", "m3/s")
                .with("avg_value", avg)
                .with("min_value", avg - 1.0)
                .with("max_value", avg + 1.0),
        );
    }

    // Five-minute group rollups, last 2 days, month-partitioned
    for i in 0..(2 * 24 * 12) {
        let ts = now_ms - i * 5 * MINUTE_MS;
        let month_first_day = DateTime::from_timestamp_millis(ts)
            .map(|dt| dt.date_naive())
            .and_then(|d| d.with_day(1))
            .expect("demo timestamps are representable");
        let avg = wave(i, 12 * 24);
        store.insert(
            "five_min_group_measurements_by_station",
            Row::new()
                .with("station_id", station_id)
                .with("group_id", group_id)
                .with("qc_level", 1)
                .with("month_first_day", month_first_day)
                .with("parameter_id", temperature_id)
                .with_timestamp("timestamp", ts)
                .with("unit", "degC")
                .with("avg_value", avg)
                .with("min_value", avg - 0.2)
                .with("max_value", avg + 0.2),
        );
    }

    tracing::info!(
        %station_id,
        %group_id,
        %sensor_id,
        %discharge_id,
        %temperature_id,
        "Seeded demo station into the in-process store"
    );
}
