//! Sensor Catalog Routes
//!
//! Flat lookups keyed by sensor, plus the sensor-parameter frequency
//! declarations used by clients to pick a fixed-resolution endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::FrequenciesQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::RowSet;

/// GET /api/v1/sensors/:sensor_id/parameters
pub async fn sensor_parameters(
    State(state): State<Arc<AppState>>,
    Path(sensor_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.parameters_by_sensor(sensor_id).await?))
}

/// GET /api/v1/sensors/:sensor_id/groups
pub async fn sensor_groups(
    State(state): State<Arc<AppState>>,
    Path(sensor_id): Path<Uuid>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(state.catalog.groups_by_sensor(sensor_id).await?))
}

/// GET /api/v1/frequencies
pub async fn parameter_frequencies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FrequenciesQuery>,
) -> ApiResult<Json<RowSet>> {
    Ok(Json(
        state
            .catalog
            .sensor_parameter_frequencies(
                query.sensor_id,
                query.parameter_id,
                &query.parameter_type,
            )
            .await?,
    ))
}
