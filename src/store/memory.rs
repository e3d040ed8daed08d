//! In-process store session
//!
//! Backs tests and the dev server. Tables are plain row vectors; `execute`
//! applies the statement's predicates, returns rows ordered by the time
//! column (ascending unless the statement asks otherwise, mirroring a
//! clustering order), projects absent columns as null cells and applies the
//! limit. Production deployments substitute a driver-backed session.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::store::error::{StoreError, StoreResult};
use crate::store::row::{Row, RowSet};
use crate::store::session::{PreparedStatement, StoreSession};
use crate::store::statement::{Projection, SortOrder, Statement};
use crate::store::value::Value;

/// In-memory wide-column store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one row into a table, creating the table if needed
    pub fn insert(&self, table: &str, row: Row) {
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.entry(table.to_string()).or_default().push(row);
    }

    /// Insert a batch of rows into a table
    pub fn insert_all(&self, table: &str, rows: impl IntoIterator<Item = Row>) {
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    /// Number of rows currently held for a table
    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.read().expect("store lock poisoned");
        tables.get(table).map(Vec::len).unwrap_or(0)
    }
}

fn matches(row: &Row, statement: &Statement, params: &[Value]) -> bool {
    let mut idx = 0;

    for column in &statement.eq_columns {
        if row.get(column) != Some(&params[idx]) {
            return false;
        }
        idx += 1;
    }

    if let Some(key) = &statement.key_column {
        if row.get(key) != Some(&params[idx]) {
            return false;
        }
        idx += 1;
    }

    if let Some(time) = &statement.time_column {
        let (from, to) = (params[idx].as_i64(), params[idx + 1].as_i64());
        match (row.timestamp(time), from, to) {
            (Some(ts), Some(from), Some(to)) => {
                if ts < from || ts > to {
                    return false;
                }
            }
            _ => return false,
        }
    }

    true
}

#[async_trait]
impl StoreSession for MemoryStore {
    async fn prepare(&self, statement: &Statement) -> StoreResult<PreparedStatement> {
        Ok(PreparedStatement::new(statement.clone()))
    }

    async fn execute(&self, prepared: &PreparedStatement, params: &[Value]) -> StoreResult<RowSet> {
        let statement = prepared.statement();
        if params.len() != statement.bind_count() {
            return Err(StoreError::BindCount {
                expected: statement.bind_count(),
                got: params.len(),
            });
        }

        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Request("store lock poisoned".to_string()))?;
        let rows = tables
            .get(&statement.table)
            .ok_or_else(|| StoreError::TableNotFound(statement.table.clone()))?;

        let mut hits: Vec<Row> = rows
            .iter()
            .filter(|row| matches(row, statement, params))
            .cloned()
            .collect();

        if let Some(time) = &statement.time_column {
            let order = statement.order.unwrap_or(SortOrder::Asc);
            hits.sort_by_key(|row| row.timestamp(time).unwrap_or(i64::MIN));
            if order == SortOrder::Desc {
                hits.reverse();
            }
        }

        if let Projection::Columns(columns) = &statement.projection {
            hits = hits.iter().map(|row| row.project(columns)).collect();
        }

        if let Some(limit) = statement.limit {
            hits.truncate(limit as usize);
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn measurement(sensor: Uuid, year: i32, ts: i64, avg: f64) -> Row {
        Row::new()
            .with("sensor_id", sensor)
            .with("qc_level", 1)
            .with("year", year)
            .with_timestamp("timestamp", ts)
            .with("avg", avg)
    }

    fn statement() -> Statement {
        Statement::select("hourly_single_measurements_by_sensor")
            .eq("sensor_id")
            .eq("qc_level")
            .key_column("year")
            .window("timestamp")
    }

    async fn run(store: &MemoryStore, statement: &Statement, params: &[Value]) -> RowSet {
        let prepared = store.prepare(statement).await.unwrap();
        store.execute(&prepared, params).await.unwrap()
    }

    #[tokio::test]
    async fn test_filters_and_window_are_inclusive() {
        let store = MemoryStore::new();
        let sensor = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.insert("hourly_single_measurements_by_sensor", measurement(sensor, 2024, 100, 1.0));
        store.insert("hourly_single_measurements_by_sensor", measurement(sensor, 2024, 200, 2.0));
        store.insert("hourly_single_measurements_by_sensor", measurement(sensor, 2024, 300, 3.0));
        store.insert("hourly_single_measurements_by_sensor", measurement(other, 2024, 200, 9.0));

        let rows = run(
            &store,
            &statement(),
            &[
                Value::Uuid(sensor),
                Value::Int(1),
                Value::Int(2024),
                Value::Timestamp(100),
                Value::Timestamp(200),
            ],
        )
        .await;

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.uuid("sensor_id") == Some(sensor)));
    }

    #[tokio::test]
    async fn test_sorts_by_requested_direction() {
        let store = MemoryStore::new();
        let sensor = Uuid::new_v4();
        for ts in [300, 100, 200] {
            store.insert(
                "hourly_single_measurements_by_sensor",
                measurement(sensor, 2024, ts, ts as f64),
            );
        }
        let params = [
            Value::Uuid(sensor),
            Value::Int(1),
            Value::Int(2024),
            Value::Timestamp(0),
            Value::Timestamp(1_000),
        ];

        let rows = run(&store, &statement().order(SortOrder::Desc), &params).await;
        let stamps: Vec<i64> = rows.iter().filter_map(|r| r.timestamp("timestamp")).collect();
        assert_eq!(stamps, vec![300, 200, 100]);

        let rows = run(&store, &statement().order(SortOrder::Asc), &params).await;
        let stamps: Vec<i64> = rows.iter().filter_map(|r| r.timestamp("timestamp")).collect();
        assert_eq!(stamps, vec![100, 200, 300]);
    }

    #[tokio::test]
    async fn test_projection_and_limit() {
        let store = MemoryStore::new();
        let sensor = Uuid::new_v4();
        for ts in [100, 200, 300] {
            store.insert(
                "hourly_single_measurements_by_sensor",
                measurement(sensor, 2024, ts, 1.0),
            );
        }

        let statement = statement()
            .columns(vec!["timestamp".into(), "min_value".into()])
            .limit(2);
        let rows = run(
            &store,
            &statement,
            &[
                Value::Uuid(sensor),
                Value::Int(1),
                Value::Int(2024),
                Value::Timestamp(0),
                Value::Timestamp(1_000),
            ],
        )
        .await;

        assert_eq!(rows.len(), 2);
        // min_value is not stored, so it projects as an explicit null cell
        assert_eq!(rows[0].get("min_value"), Some(&Value::Null));
        assert_eq!(rows[0].len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_table_errors() {
        let store = MemoryStore::new();
        let statement = Statement::select("nope").eq("id");
        let prepared = store.prepare(&statement).await.unwrap();
        let err = store
            .execute(&prepared, &[Value::Int(1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn test_bind_count_mismatch() {
        let store = MemoryStore::new();
        store.insert("t", Row::new().with("id", 1));
        let prepared = store.prepare(&Statement::select("t").eq("id")).await.unwrap();
        let err = store.execute(&prepared, &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::BindCount { expected: 1, got: 0 }));
    }
}
