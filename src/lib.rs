//! # Aquifer
//!
//! API service for environmental sensor time-series, backed by a
//! time-bucket-partitioned wide-column store.
//!
//! Measurement rollups live in per-resolution table families that shard rows
//! into calendar buckets (day, ISO week, month, year). Reading a time window
//! therefore means sequencing the window into partition keys, issuing one
//! concurrent read per partition and concatenating the results. When a
//! caller does not pick a resolution, the adaptive selector maps the window
//! span and the sensor group's declared rollup frequencies onto exactly one
//! resolution first.
//!
//! ## Modules
//!
//! - [`store`]: injected wide-column store session (trait + in-process impl)
//! - [`partition`]: bucketing schemes and partition-key sequencing
//! - [`fetch`]: statement templates and the concurrent fan-out executor
//! - [`resolution`]: rollup frequencies and the adaptive selector
//! - [`series`]: per-parameter chart series aggregation
//! - [`catalog`]: station/sensor/parameter catalog lookups
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aquifer::api::{serve, ApiConfig, AppState};
//! use aquifer::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(MemoryStore::new());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(session, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod partition;
pub mod resolution;
pub mod series;
pub mod store;
pub mod time;

// Re-export top-level types for convenience
pub use store::{
    MemoryStore, PreparedStatement, Row, RowSet, SortOrder, Statement, StoreError, StoreResult,
    StoreSession, Value,
};

pub use partition::{partition_keys, BucketScheme, PartitionKey, SequenceError};

pub use fetch::{FanOutExecutor, FetchError, FetchResult};

pub use resolution::{
    choose, choose_from_tokens, Frequency, GroupData, GroupFormat, GroupRequest,
    ResolutionSelector,
};

pub use series::{ParameterSeries, SeriesMap};

pub use catalog::Catalog;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};

pub use time::TimeRange;
