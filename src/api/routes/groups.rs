//! Group Measurement Routes
//!
//! Parameter-group measurements for one station: fixed-resolution rows, the
//! chart shape, and the adaptive endpoint that picks a resolution from the
//! group's declared frequency set.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::GroupMeasurementQuery;
use crate::api::error::ApiResult;
use crate::api::routes::{parse_format, parse_order, parse_resolution};
use crate::api::state::AppState;
use crate::resolution::{GroupData, GroupFormat, GroupRequest};
use crate::time::TimeRange;

fn group_request(
    station_id: Uuid,
    group_id: Uuid,
    query: &GroupMeasurementQuery,
    format: GroupFormat,
) -> ApiResult<GroupRequest> {
    Ok(GroupRequest {
        station_id,
        group_id,
        qc_level: query.qc_level,
        range: TimeRange::resolve(query.from_timestamp, query.to_timestamp),
        order: parse_order(query.order_by.as_deref())?,
        format,
    })
}

/// GET /api/v1/stations/:station_id/groups/:group_id/measurements/:resolution
pub async fn group_measurements(
    State(state): State<Arc<AppState>>,
    Path((station_id, group_id, resolution)): Path<(Uuid, Uuid, String)>,
    Query(query): Query<GroupMeasurementQuery>,
) -> ApiResult<Json<GroupData>> {
    let frequency = parse_resolution(&resolution)?;
    let request = group_request(station_id, group_id, &query, GroupFormat::Rows)?;
    Ok(Json(state.selector.fetch_group(frequency, &request).await?))
}

/// GET /api/v1/stations/:station_id/groups/:group_id/measurements/:resolution/chart
pub async fn group_chart(
    State(state): State<Arc<AppState>>,
    Path((station_id, group_id, resolution)): Path<(Uuid, Uuid, String)>,
    Query(query): Query<GroupMeasurementQuery>,
) -> ApiResult<Json<GroupData>> {
    let frequency = parse_resolution(&resolution)?;
    let request = group_request(station_id, group_id, &query, GroupFormat::Chart)?;
    Ok(Json(state.selector.fetch_group(frequency, &request).await?))
}

/// GET /api/v1/stations/:station_id/groups/:group_id/measurements/auto
///
/// The adaptive path: the group's available frequency set decides which
/// rollup family answers the window.
pub async fn group_auto(
    State(state): State<Arc<AppState>>,
    Path((station_id, group_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<GroupMeasurementQuery>,
) -> ApiResult<Json<GroupData>> {
    let format = parse_format(query.format.as_deref())?;
    let request = group_request(station_id, group_id, &query, format)?;
    Ok(Json(state.selector.select_and_fetch(&request).await?))
}
