//! Row records returned by the store
//!
//! A `Row` keeps its columns in the order the store returned them and
//! serializes to a JSON object, so catalog endpoints can hand rows straight
//! back to the caller.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::store::value::Value;

/// All rows from one store read
pub type RowSet = Vec<Row>;

/// One wide-column row: ordered (column, value) pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a column
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push((name.into(), value.into()));
        self
    }

    /// Builder method: add a timestamp column (epoch ms)
    pub fn with_timestamp(self, name: impl Into<String>, ms: i64) -> Self {
        self.with(name, Value::Timestamp(ms))
    }

    /// Builder method: add a null column
    pub fn with_null(self, name: impl Into<String>) -> Self {
        self.with(name, Value::Null)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value)
    }

    pub fn uuid(&self, name: &str) -> Option<Uuid> {
        self.get(name).and_then(Value::as_uuid)
    }

    pub fn bigint(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn double(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.as_text().map(str::to_string))
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(Value::as_date)
    }

    /// Epoch-millisecond view of a timestamp column
    pub fn timestamp(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn text_list(&self, name: &str) -> Option<Vec<String>> {
        self.get(name).and_then(|v| v.as_text_list().map(<[String]>::to_vec))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(col, value)| (col.as_str(), value))
    }

    /// Project onto a column list; absent columns come back as null cells
    pub fn project(&self, columns: &[String]) -> Row {
        let mut out = Row::new();
        for name in columns {
            let value = self.get(name).cloned().unwrap_or(Value::Null);
            out.insert(name.clone(), value);
        }
        out
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let id = Uuid::new_v4();
        let row = Row::new()
            .with("sensor_id", id)
            .with("qc_level", 1)
            .with_timestamp("timestamp", 1_700_000_000_000)
            .with("avg_value", 3.5)
            .with("unit", "m3/s");

        assert_eq!(row.uuid("sensor_id"), Some(id));
        assert_eq!(row.bigint("qc_level"), Some(1));
        assert_eq!(row.timestamp("timestamp"), Some(1_700_000_000_000));
        assert_eq!(row.double("avg_value"), Some(3.5));
        assert_eq!(row.text("unit"), Some("m3/s".to_string()));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_projection_fills_nulls() {
        let row = Row::new().with("a", 1).with("b", 2);
        let projected = row.project(&["b".to_string(), "c".to_string()]);

        assert_eq!(projected.get("b"), Some(&Value::Int(2)));
        assert_eq!(projected.get("c"), Some(&Value::Null));
        assert_eq!(projected.get("a"), None);
    }

    #[test]
    fn test_serializes_as_object_in_column_order() {
        let row = Row::new().with("z", 1).with("a", "x");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"z":1,"a":"x"}"#);
    }
}
