//! Bucketing schemes and partition keys
//!
//! Every measurement table shards its rows by a calendar bucket; the bucket
//! kind decides both the partition-key column and the key values the fan-out
//! binds.

use chrono::NaiveDate;
use std::fmt;

use crate::store::Value;

/// How a table partitions rows by time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketScheme {
    /// Table is not time-partitioned
    None,
    /// One partition per calendar day
    Daily,
    /// One partition per ISO week, keyed by its Monday
    Weekly,
    /// One partition per calendar month, keyed by its first day
    Monthly,
    /// One partition per calendar year
    Yearly,
}

impl BucketScheme {
    /// Partition-key column used by tables with this scheme
    pub fn key_column(&self) -> Option<&'static str> {
        match self {
            BucketScheme::None => None,
            BucketScheme::Daily => Some("date"),
            BucketScheme::Weekly => Some("week_first_day"),
            BucketScheme::Monthly => Some("month_first_day"),
            BucketScheme::Yearly => Some("year"),
        }
    }
}

/// One calendar bucket a partitioned table stores rows under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartitionKey {
    /// Sentinel for non-partitioned tables
    Whole,
    /// Midnight date of the day bucket
    Day(NaiveDate),
    /// Monday of the ISO week bucket
    Week(NaiveDate),
    /// First day of the month bucket
    Month(NaiveDate),
    Year(i32),
}

impl PartitionKey {
    /// Bound value for the key column; `Whole` binds nothing
    pub fn to_value(&self) -> Option<Value> {
        match self {
            PartitionKey::Whole => None,
            PartitionKey::Day(d) | PartitionKey::Week(d) | PartitionKey::Month(d) => {
                Some(Value::Date(*d))
            }
            PartitionKey::Year(y) => Some(Value::Int(*y)),
        }
    }

    /// Date view for calendar-keyed buckets
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PartitionKey::Day(d) | PartitionKey::Week(d) | PartitionKey::Month(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Whole => write!(f, "whole"),
            PartitionKey::Day(d) => write!(f, "day:{d}"),
            PartitionKey::Week(d) => write!(f, "week:{d}"),
            PartitionKey::Month(d) => write!(f, "month:{d}"),
            PartitionKey::Year(y) => write!(f, "year:{y}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_columns() {
        assert_eq!(BucketScheme::None.key_column(), None);
        assert_eq!(BucketScheme::Daily.key_column(), Some("date"));
        assert_eq!(BucketScheme::Weekly.key_column(), Some("week_first_day"));
        assert_eq!(BucketScheme::Monthly.key_column(), Some("month_first_day"));
        assert_eq!(BucketScheme::Yearly.key_column(), Some("year"));
    }

    #[test]
    fn test_bound_values() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(PartitionKey::Whole.to_value(), None);
        assert_eq!(PartitionKey::Week(date).to_value(), Some(Value::Date(date)));
        assert_eq!(PartitionKey::Year(2024).to_value(), Some(Value::Int(2024)));
    }
}
