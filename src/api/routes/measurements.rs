//! Sensor Measurement Routes
//!
//! Fixed-resolution measurement reads for one sensor and parameter. The
//! resolution is a path segment; the handler builds the matching rollup
//! statement and fans out over the partitions the window touches.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::MeasurementQuery;
use crate::api::error::ApiResult;
use crate::api::routes::{parse_order, parse_resolution};
use crate::api::state::AppState;
use crate::fetch::{profile_statement, single_statement, DataSet};
use crate::resolution::Frequency;
use crate::store::{RowSet, SortOrder, Statement, Value};
use crate::time::TimeRange;

fn parse_query(
    resolution: &str,
    query: &MeasurementQuery,
) -> ApiResult<(Frequency, SortOrder, Vec<DataSet>)> {
    let frequency = parse_resolution(resolution)?;
    let order = parse_order(query.order_by.as_deref())?;
    let data_sets = query
        .data_sets
        .as_deref()
        .map(DataSet::parse_list)
        .unwrap_or_default();
    Ok((frequency, order, data_sets))
}

async fn fetch_measurements(
    state: &AppState,
    statement: Statement,
    frequency: Frequency,
    query: &MeasurementQuery,
) -> ApiResult<RowSet> {
    let range = TimeRange::resolve(query.from_timestamp, query.to_timestamp);
    let binds = [
        Value::Uuid(query.sensor_id),
        Value::Uuid(query.parameter_id),
        Value::Int(query.qc_level),
    ];

    let rows = state
        .executor
        .fetch_all_partitions(&statement, frequency.scheme(), range, &binds)
        .await?;
    Ok(rows)
}

/// GET /api/v1/measurements/:resolution
pub async fn single_measurements(
    State(state): State<Arc<AppState>>,
    Path(resolution): Path<String>,
    Query(query): Query<MeasurementQuery>,
) -> ApiResult<Json<RowSet>> {
    let (frequency, order, data_sets) = parse_query(&resolution, &query)?;
    let statement = single_statement(frequency, &data_sets, order);
    let rows = fetch_measurements(&state, statement, frequency, &query).await?;
    Ok(Json(rows))
}

/// GET /api/v1/profile-measurements/:resolution
pub async fn profile_measurements(
    State(state): State<Arc<AppState>>,
    Path(resolution): Path<String>,
    Query(query): Query<MeasurementQuery>,
) -> ApiResult<Json<RowSet>> {
    let (frequency, order, data_sets) = parse_query(&resolution, &query)?;
    let statement = profile_statement(frequency, &data_sets, order);
    let rows = fetch_measurements(&state, statement, frequency, &query).await?;
    Ok(Json(rows))
}
