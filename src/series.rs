//! Chart series aggregation
//!
//! Reshapes flat group-measurement rows into per-parameter time series for
//! charting. Parameters appear in first-seen order while scanning rows in
//! the order the fan-out produced them; points are never re-sorted and
//! duplicate timestamps (possible at partition boundaries) are kept as-is.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::store::Row;

/// Chart series for one parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSeries {
    pub id: Uuid,
    pub qc_level: i32,
    pub unit: Option<String>,
    /// `(timestamp_ms, avg)` points
    pub averages: Vec<(i64, Option<f64>)>,
    /// `(timestamp_ms, min, max)` points
    pub ranges: Vec<(i64, Option<f64>, Option<f64>)>,
}

/// Insertion-ordered `parameter_id -> series` mapping
///
/// Serializes to a JSON object whose keys keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMap {
    entries: Vec<(Uuid, ParameterSeries)>,
}

impl SeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group flat rollup rows into per-parameter series
    pub fn from_rows(rows: &[Row], qc_level: i32) -> Self {
        let mut map = SeriesMap::new();
        for row in rows {
            let Some(parameter_id) = row.uuid("parameter_id") else {
                continue;
            };
            let Some(timestamp) = row.timestamp("timestamp") else {
                continue;
            };

            let unit = row.text("unit");
            let series = map.entry(parameter_id, qc_level, unit);
            series.averages.push((timestamp, row.double("avg_value")));
            series
                .ranges
                .push((timestamp, row.double("min_value"), row.double("max_value")));
        }
        map
    }

    fn entry(&mut self, id: Uuid, qc_level: i32, unit: Option<String>) -> &mut ParameterSeries {
        if let Some(position) = self.entries.iter().position(|(key, _)| *key == id) {
            return &mut self.entries[position].1;
        }
        self.entries.push((
            id,
            ParameterSeries {
                id,
                qc_level,
                unit,
                averages: Vec::new(),
                ranges: Vec::new(),
            },
        ));
        &mut self
            .entries
            .last_mut()
            .expect("entry was just pushed")
            .1
    }

    pub fn get(&self, id: &Uuid) -> Option<&ParameterSeries> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, series)| series)
    }

    /// Parameter ids in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &Uuid> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &ParameterSeries)> {
        self.entries.iter().map(|(key, series)| (key, series))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SeriesMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, series) in &self.entries {
            map.serialize_entry(id, series)?;
        }
        map.end()
    }
}
