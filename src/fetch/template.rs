//! Measurement query templates
//!
//! Builders for the per-resolution rollup table statements. The column
//! selection rule is a fixed external contract with the store schema: with no
//! requested data sets the statement selects the plain `min, avg, max`
//! columns; with an explicit request it selects the `min_value` /
//! `avg_value` / `max_value` columns for the requested members only. The
//! identifying columns (ids, QC level, partition key, timestamp, unit) are
//! always present.

use crate::resolution::Frequency;
use crate::store::{SortOrder, Statement};

/// One of the pre-aggregated value columns a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSet {
    Min,
    Avg,
    Max,
}

impl DataSet {
    /// Parse a comma-separated request list; unknown names are ignored
    pub fn parse_list(raw: &str) -> Vec<DataSet> {
        let mut sets = Vec::new();
        for name in raw.split(',') {
            let parsed = match name.trim() {
                "min" => Some(DataSet::Min),
                "avg" => Some(DataSet::Avg),
                "max" => Some(DataSet::Max),
                _ => None,
            };
            if let Some(set) = parsed {
                if !sets.contains(&set) {
                    sets.push(set);
                }
            }
        }
        sets
    }

    fn value_column(&self) -> &'static str {
        match self {
            DataSet::Min => "min_value",
            DataSet::Avg => "avg_value",
            DataSet::Max => "max_value",
        }
    }
}

/// Column list for a sensor measurement statement
fn measurement_columns(key_column: &str, extra: &[&str], data_sets: &[DataSet]) -> Vec<String> {
    let mut columns: Vec<String> = vec![
        "sensor_id".into(),
        "parameter_id".into(),
        "qc_level".into(),
        key_column.into(),
        "timestamp".into(),
    ];
    columns.extend(extra.iter().map(|c| c.to_string()));
    columns.push("unit".into());

    if data_sets.is_empty() {
        columns.extend(["min".into(), "avg".into(), "max".into()]);
    } else {
        // Fixed min/avg/max order regardless of how the request listed them
        for set in [DataSet::Min, DataSet::Avg, DataSet::Max] {
            if data_sets.contains(&set) {
                columns.push(set.value_column().into());
            }
        }
    }

    columns
}

fn key_column_of(frequency: Frequency) -> &'static str {
    frequency
        .scheme()
        .key_column()
        .expect("every rollup frequency is time-partitioned")
}

fn sensor_statement(
    table: String,
    frequency: Frequency,
    extra: &[&str],
    data_sets: &[DataSet],
    order: SortOrder,
) -> Statement {
    let key = key_column_of(frequency);
    Statement::select(table)
        .columns(measurement_columns(key, extra, data_sets))
        .eq("sensor_id")
        .eq("parameter_id")
        .eq("qc_level")
        .key_column(key)
        .window("timestamp")
        .order(order)
}

/// Single-parameter measurements for one sensor
pub fn single_statement(
    frequency: Frequency,
    data_sets: &[DataSet],
    order: SortOrder,
) -> Statement {
    sensor_statement(frequency.single_table(), frequency, &[], data_sets, order)
}

/// Profile-parameter measurements for one sensor (vertical profile axis)
pub fn profile_statement(
    frequency: Frequency,
    data_sets: &[DataSet],
    order: SortOrder,
) -> Statement {
    sensor_statement(
        frequency.profile_table(),
        frequency,
        &["vertical_position"],
        data_sets,
        order,
    )
}

/// Parameter-group measurements for one station
pub fn group_statement(frequency: Frequency, order: SortOrder) -> Statement {
    let key = key_column_of(frequency);
    Statement::select(frequency.group_table())
        .eq("station_id")
        .eq("group_id")
        .eq("qc_level")
        .key_column(key)
        .window("timestamp")
        .order(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Projection;

    #[test]
    fn test_default_selects_plain_value_columns() {
        let statement = single_statement(Frequency::Daily, &[], SortOrder::Desc);
        assert_eq!(
            statement.cql(),
            "SELECT sensor_id, parameter_id, qc_level, year, timestamp, unit, min, avg, max \
             FROM daily_single_measurements_by_sensor \
             WHERE sensor_id=? AND parameter_id=? AND qc_level=? AND year=? \
             AND timestamp>=? AND timestamp<=? ORDER BY timestamp DESC"
        );
    }

    #[test]
    fn test_requested_data_sets_select_suffixed_columns() {
        let sets = DataSet::parse_list("max,min");
        let statement = single_statement(Frequency::OneMin, &sets, SortOrder::Asc);

        let Projection::Columns(columns) = &statement.projection else {
            panic!("expected explicit projection");
        };
        // week-partitioned table, min/max in canonical order, no avg
        assert_eq!(
            columns,
            &[
                "sensor_id",
                "parameter_id",
                "qc_level",
                "week_first_day",
                "timestamp",
                "unit",
                "min_value",
                "max_value",
            ]
        );
    }

    #[test]
    fn test_unknown_data_set_names_are_ignored() {
        assert_eq!(DataSet::parse_list("median,avg,p99"), vec![DataSet::Avg]);
        assert!(DataSet::parse_list("").is_empty());
        assert_eq!(
            DataSet::parse_list("min, avg ,min"),
            vec![DataSet::Min, DataSet::Avg]
        );
    }

    #[test]
    fn test_profile_statement_carries_vertical_position() {
        let statement = profile_statement(Frequency::OneSec, &[], SortOrder::Desc);
        let Projection::Columns(columns) = &statement.projection else {
            panic!("expected explicit projection");
        };
        assert!(columns.contains(&"vertical_position".to_string()));
        assert_eq!(statement.table, "one_sec_profile_measurements_by_sensor");
        assert_eq!(statement.key_column.as_deref(), Some("date"));
    }

    #[test]
    fn test_group_statement_selects_everything() {
        let statement = group_statement(Frequency::Hourly, SortOrder::Asc);
        assert_eq!(statement.projection, Projection::All);
        assert_eq!(
            statement.eq_columns,
            vec!["station_id", "group_id", "qc_level"]
        );
        assert_eq!(statement.key_column.as_deref(), Some("year"));
    }
}
