//! Station Catalog Routes
//!
//! Flat lookups keyed by station: station records, sensors, parameters,
//! parameter groups, QC levels and frequency declarations.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::StationsQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{Row, RowSet};

/// GET /api/v1/stations
pub async fn list_stations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StationsQuery>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.stations(query.bucket).await?))
}

/// GET /api/v1/stations/:station_id
pub async fn get_station(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<Row>> {
    state
        .catalog
        .station(station_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("station {station_id}")))
}

/// GET /api/v1/stations/:station_id/sensors
pub async fn station_sensors(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.sensors_by_station(station_id).await?))
}

/// GET /api/v1/stations/:station_id/parameters
pub async fn station_parameters(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.parameters_by_station(station_id).await?))
}

/// GET /api/v1/stations/:station_id/groups
pub async fn station_groups(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.groups_by_station(station_id).await?))
}

/// GET /api/v1/stations/:station_id/group-parameters
pub async fn station_group_parameters(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(
        state.catalog.group_parameters_by_station(station_id).await?,
    ))
}

/// GET /api/v1/stations/:station_id/group-parameters/:group_id
pub async fn station_group_parameters_for_group(
    State(state): State<Arc<AppState>>,
    Path((station_id, group_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(
        state.catalog.group_parameters(station_id, group_id).await?,
    ))
}

/// GET /api/v1/stations/:station_id/qc-levels
pub async fn station_qc_levels(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.qc_levels_by_station(station_id).await?))
}

/// GET /api/v1/stations/:station_id/groups/:group_id/frequencies
pub async fn station_group_frequencies(
    State(state): State<Arc<AppState>>,
    Path((station_id, group_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(
        state.catalog.group_frequencies(station_id, group_id).await?,
    ))
}
