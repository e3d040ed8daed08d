//! Structured SELECT templates
//!
//! A `Statement` describes one read against one table: projection, fixed
//! equality predicates, an optional partition-key predicate, an optional
//! inclusive time window and ordering. Statements render to CQL text for
//! driver-backed sessions and for logging; the in-process store interprets
//! them directly.

use std::fmt;
use std::str::FromStr;

/// Column projection for a SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `SELECT *`
    All,
    /// Explicit column list, in order
    Columns(Vec<String>),
}

/// Sort direction for the time column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    /// Newest first; the default for measurement endpoints
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Unrecognized sort direction token
#[derive(Debug, thiserror::Error)]
#[error("invalid sort order: {0} (expected ASC or DESC)")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}

/// A prepared-query template for one table
///
/// Bound-parameter order at execution time is fixed: the equality columns in
/// declaration order, then the partition key (if `key_column` is set), then
/// the window start and end (if `time_column` is set).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub table: String,
    pub projection: Projection,
    /// Fixed `column = ?` predicates, bound in order
    pub eq_columns: Vec<String>,
    /// Partition-bucket predicate (`column = ?`), bound after the equalities
    pub key_column: Option<String>,
    /// Inclusive window predicate (`column >= ? AND column <= ?`)
    pub time_column: Option<String>,
    /// `ORDER BY time_column <dir>`; requires `time_column`
    pub order: Option<SortOrder>,
    pub limit: Option<u32>,
}

impl Statement {
    /// Start a `SELECT *` template for a table
    pub fn select(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            projection: Projection::All,
            eq_columns: Vec::new(),
            key_column: None,
            time_column: None,
            order: None,
            limit: None,
        }
    }

    /// Builder method: explicit projection
    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.projection = Projection::Columns(columns);
        self
    }

    /// Builder method: add an equality predicate
    pub fn eq(mut self, column: impl Into<String>) -> Self {
        self.eq_columns.push(column.into());
        self
    }

    /// Builder method: partition-key predicate
    pub fn key_column(mut self, column: impl Into<String>) -> Self {
        self.key_column = Some(column.into());
        self
    }

    /// Builder method: inclusive time-window predicate
    pub fn window(mut self, column: impl Into<String>) -> Self {
        self.time_column = Some(column.into());
        self
    }

    /// Builder method: sort by the time column
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Builder method: row limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of values `execute` must bind for this statement
    pub fn bind_count(&self) -> usize {
        self.eq_columns.len()
            + usize::from(self.key_column.is_some())
            + if self.time_column.is_some() { 2 } else { 0 }
    }

    /// Render to CQL text
    pub fn cql(&self) -> String {
        let columns = match &self.projection {
            Projection::All => "*".to_string(),
            Projection::Columns(cols) => cols.join(", "),
        };

        let mut predicates: Vec<String> = self
            .eq_columns
            .iter()
            .map(|col| format!("{col}=?"))
            .collect();
        if let Some(key) = &self.key_column {
            predicates.push(format!("{key}=?"));
        }
        if let Some(time) = &self.time_column {
            predicates.push(format!("{time}>=?"));
            predicates.push(format!("{time}<=?"));
        }

        let mut cql = format!("SELECT {columns} FROM {}", self.table);
        if !predicates.is_empty() {
            cql.push_str(" WHERE ");
            cql.push_str(&predicates.join(" AND "));
        }
        if let (Some(time), Some(order)) = (&self.time_column, self.order) {
            cql.push_str(&format!(" ORDER BY {time} {}", order.keyword()));
        }
        if let Some(limit) = self.limit {
            cql.push_str(&format!(" LIMIT {limit}"));
        }
        cql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cql())
    }
}
