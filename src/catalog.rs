//! Station and sensor catalog lookups
//!
//! Flat single-partition reads against the catalog tables: stations,
//! sensors, parameters, parameter groups, QC levels and the per-group
//! frequency sets the adaptive selector consumes. Rows pass through to the
//! caller untyped; only the frequency set gets a typed accessor.

use std::sync::Arc;

use uuid::Uuid;

use crate::store::{RowSet, Row, Statement, StoreResult, StoreSession, Value};

/// Read access to the catalog tables
#[derive(Clone)]
pub struct Catalog {
    session: Arc<dyn StoreSession>,
}

impl Catalog {
    pub fn new(session: Arc<dyn StoreSession>) -> Self {
        Self { session }
    }

    async fn fetch(&self, statement: Statement, params: &[Value]) -> StoreResult<RowSet> {
        let prepared = self.session.prepare(&statement).await?;
        self.session.execute(&prepared, params).await
    }

    /// Stations in one listing bucket
    pub async fn stations(&self, bucket: i32) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("stations").eq("bucket"),
            &[Value::Int(bucket)],
        )
        .await
    }

    /// Station detail record, if the station exists
    pub async fn station(&self, station_id: Uuid) -> StoreResult<Option<Row>> {
        let rows = self
            .fetch(
                Statement::select("station_info_by_station").eq("id"),
                &[Value::Uuid(station_id)],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn sensors_by_station(&self, station_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("sensors_by_station").eq("station_id"),
            &[Value::Uuid(station_id)],
        )
        .await
    }

    pub async fn parameters_by_station(&self, station_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("parameters_by_station").eq("station_id"),
            &[Value::Uuid(station_id)],
        )
        .await
    }

    pub async fn groups_by_station(&self, station_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("parameter_groups_by_station").eq("station_id"),
            &[Value::Uuid(station_id)],
        )
        .await
    }

    /// Parameter membership for every group of a station
    pub async fn group_parameters_by_station(&self, station_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("group_parameters_by_station").eq("station_id"),
            &[Value::Uuid(station_id)],
        )
        .await
    }

    /// Parameters of one specific group
    pub async fn group_parameters(&self, station_id: Uuid, group_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("parameters_by_station_group")
                .eq("station_id")
                .eq("group_id"),
            &[Value::Uuid(station_id), Value::Uuid(group_id)],
        )
        .await
    }

    pub async fn parameters_by_sensor(&self, sensor_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("parameters_by_sensor").eq("sensor_id"),
            &[Value::Uuid(sensor_id)],
        )
        .await
    }

    pub async fn groups_by_sensor(&self, sensor_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("parameter_groups_by_sensor").eq("sensor_id"),
            &[Value::Uuid(sensor_id)],
        )
        .await
    }

    pub async fn qc_levels_by_station(&self, station_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("group_qc_levels_by_station").eq("station_id"),
            &[Value::Uuid(station_id)],
        )
        .await
    }

    /// Rollup frequencies declared for a (sensor, parameter) pair
    pub async fn sensor_parameter_frequencies(
        &self,
        sensor_id: Uuid,
        parameter_id: Uuid,
        parameter_type: &str,
    ) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("measurement_frequencies_by_sensor_parameter")
                .eq("sensor_id")
                .eq("parameter_id")
                .eq("parameter_type"),
            &[
                Value::Uuid(sensor_id),
                Value::Uuid(parameter_id),
                Value::Text(parameter_type.to_string()),
            ],
        )
        .await
    }

    /// Frequency catalog rows for a (station, group) pair
    pub async fn group_frequencies(&self, station_id: Uuid, group_id: Uuid) -> StoreResult<RowSet> {
        self.fetch(
            Statement::select("group_measurement_frequencies_by_station")
                .eq("station_id")
                .eq("group_id"),
            &[Value::Uuid(station_id), Value::Uuid(group_id)],
        )
        .await
    }

    /// Rollup tokens available for a (station, group)
    ///
    /// The adaptive selector's availability set, fetched fresh per request.
    /// A missing catalog row means no rollups exist, which is an empty set
    /// rather than an error.
    pub async fn group_frequency_tokens(
        &self,
        station_id: Uuid,
        group_id: Uuid,
    ) -> StoreResult<Vec<String>> {
        let rows = self.group_frequencies(station_id, group_id).await?;
        Ok(rows
            .first()
            .and_then(|row| row.text_list("measurement_frequencies"))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn catalog_with(table: &str, rows: Vec<Row>) -> Catalog {
        let store = MemoryStore::new();
        store.insert_all(table, rows);
        Catalog::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_station_lookup() {
        let station = Uuid::new_v4();
        let other = Uuid::new_v4();
        let catalog = catalog_with(
            "station_info_by_station",
            vec![
                Row::new().with("id", station).with("name", "Upper Basin"),
                Row::new().with("id", other).with("name", "Lower Basin"),
            ],
        );

        let row = catalog.station(station).await.unwrap().unwrap();
        assert_eq!(row.text("name"), Some("Upper Basin".to_string()));

        assert!(catalog.station(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_group_frequency_tokens() {
        let (station, group) = (Uuid::new_v4(), Uuid::new_v4());
        let catalog = catalog_with(
            "group_measurement_frequencies_by_station",
            vec![Row::new()
                .with("station_id", station)
                .with("group_id", group)
                .with(
                    "measurement_frequencies",
                    vec!["5 Min".to_string(), "Hourly".to_string()],
                )],
        );

        let tokens = catalog.group_frequency_tokens(station, group).await.unwrap();
        assert_eq!(tokens, vec!["5 Min", "Hourly"]);

        // Unknown group: empty set, not an error
        let tokens = catalog
            .group_frequency_tokens(station, Uuid::new_v4())
            .await
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[tokio::test]
    async fn test_sensors_filtered_by_station() {
        let station = Uuid::new_v4();
        let catalog = catalog_with(
            "sensors_by_station",
            vec![
                Row::new().with("station_id", station).with("label", "s1"),
                Row::new().with("station_id", station).with("label", "s2"),
                Row::new()
                    .with("station_id", Uuid::new_v4())
                    .with("label", "elsewhere"),
            ],
        );

        let rows = catalog.sensors_by_station(station).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
