//! Partition key sequencing
//!
//! Turns a time window plus a bucketing scheme into the ordered list of
//! partition keys whose buckets intersect the window. Pure calendar math, no
//! I/O. Keys come out strictly ascending, unique and gap-free over the
//! window; a window that starts and ends in the same bucket yields exactly
//! one key.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Weekday};
use thiserror::Error;

use crate::partition::scheme::{BucketScheme, PartitionKey};
use crate::time::TimeRange;

/// Sequencing failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// Window bounds are inverted; callers must validate upstream
    #[error("invalid time range: from {from_ms} is after to {to_ms}")]
    InvalidRange { from_ms: i64, to_ms: i64 },

    /// Timestamp cannot be represented as a calendar date
    #[error("timestamp {0} is outside the representable date range")]
    OutOfRange(i64),
}

/// Ordered partition keys covering `range` under `scheme`
pub fn partition_keys(
    range: TimeRange,
    scheme: BucketScheme,
) -> Result<Vec<PartitionKey>, SequenceError> {
    if !range.is_ordered() {
        return Err(SequenceError::InvalidRange {
            from_ms: range.from_ms,
            to_ms: range.to_ms,
        });
    }

    if scheme == BucketScheme::None {
        return Ok(vec![PartitionKey::Whole]);
    }

    let from = date_of(range.from_ms)?;
    let to = date_of(range.to_ms)?;

    let keys = match scheme {
        BucketScheme::None => unreachable!("handled above"),
        BucketScheme::Daily => walk(from, to, PartitionKey::Day, |d| {
            d.checked_add_days(Days::new(1))
        }),
        BucketScheme::Weekly => walk(
            from.week(Weekday::Mon).first_day(),
            to,
            PartitionKey::Week,
            |d| d.checked_add_days(Days::new(7)),
        ),
        BucketScheme::Monthly => walk(first_of_month(from), to, PartitionKey::Month, |d| {
            d.checked_add_months(Months::new(1))
        }),
        BucketScheme::Yearly => (from.year()..=to.year()).map(PartitionKey::Year).collect(),
    };

    Ok(keys)
}

/// UTC calendar date of an epoch-millisecond timestamp
fn date_of(timestamp_ms: i64) -> Result<NaiveDate, SequenceError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.date_naive())
        .ok_or(SequenceError::OutOfRange(timestamp_ms))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("the first of the month always exists")
}

/// Step bucket-start dates from `start` while they do not pass `to`
fn walk(
    start: NaiveDate,
    to: NaiveDate,
    wrap: fn(NaiveDate) -> PartitionKey,
    step: fn(NaiveDate) -> Option<NaiveDate>,
) -> Vec<PartitionKey> {
    let mut keys = Vec::new();
    let mut current = start;
    while current <= to {
        keys.push(wrap(current));
        match step(current) {
            Some(next) => current = next,
            None => break,
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ms(year: i32, month: u32, day: u32, hour: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_ascending_unique(keys: &[PartitionKey]) {
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "keys must be strictly ascending: {pair:?}");
        }
    }

    #[test]
    fn test_none_scheme_single_sentinel() {
        let range = TimeRange::new(ms(2024, 1, 1, 0, 0), ms(2025, 1, 1, 0, 0));
        let keys = partition_keys(range, BucketScheme::None).unwrap();
        assert_eq!(keys, vec![PartitionKey::Whole]);
    }

    #[test]
    fn test_daily_covers_every_day() {
        let range = TimeRange::new(ms(2024, 2, 27, 13, 30), ms(2024, 3, 2, 1, 0));
        let keys = partition_keys(range, BucketScheme::Daily).unwrap();

        // Leap February: 27, 28, 29, then March 1 and 2
        assert_eq!(
            keys,
            vec![
                PartitionKey::Day(date(2024, 2, 27)),
                PartitionKey::Day(date(2024, 2, 28)),
                PartitionKey::Day(date(2024, 2, 29)),
                PartitionKey::Day(date(2024, 3, 1)),
                PartitionKey::Day(date(2024, 3, 2)),
            ]
        );
        assert_ascending_unique(&keys);
    }

    #[test]
    fn test_weekly_starts_on_monday() {
        // 2024-03-07 is a Thursday; its ISO week starts Monday 2024-03-04
        let range = TimeRange::new(ms(2024, 3, 7, 10, 0), ms(2024, 3, 20, 10, 0));
        let keys = partition_keys(range, BucketScheme::Weekly).unwrap();

        assert_eq!(
            keys,
            vec![
                PartitionKey::Week(date(2024, 3, 4)),
                PartitionKey::Week(date(2024, 3, 11)),
                PartitionKey::Week(date(2024, 3, 18)),
            ]
        );
        for key in &keys {
            assert_eq!(key.date().unwrap().weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_monthly_spans_year_boundary() {
        let range = TimeRange::new(ms(2023, 11, 20, 0, 0), ms(2024, 2, 3, 0, 0));
        let keys = partition_keys(range, BucketScheme::Monthly).unwrap();

        assert_eq!(
            keys,
            vec![
                PartitionKey::Month(date(2023, 11, 1)),
                PartitionKey::Month(date(2023, 12, 1)),
                PartitionKey::Month(date(2024, 1, 1)),
                PartitionKey::Month(date(2024, 2, 1)),
            ]
        );
        assert_ascending_unique(&keys);
    }

    #[test]
    fn test_yearly_inclusive_of_both_ends() {
        let range = TimeRange::new(ms(2021, 6, 1, 0, 0), ms(2024, 1, 1, 0, 0));
        let keys = partition_keys(range, BucketScheme::Yearly).unwrap();
        assert_eq!(
            keys,
            vec![
                PartitionKey::Year(2021),
                PartitionKey::Year(2022),
                PartitionKey::Year(2023),
                PartitionKey::Year(2024),
            ]
        );
    }

    #[test]
    fn test_equal_bounds_yield_one_key() {
        let at = ms(2024, 5, 15, 12, 0);
        let range = TimeRange::new(at, at);

        for scheme in [
            BucketScheme::Daily,
            BucketScheme::Weekly,
            BucketScheme::Monthly,
            BucketScheme::Yearly,
        ] {
            let keys = partition_keys(range, scheme).unwrap();
            assert_eq!(keys.len(), 1, "{scheme:?} should yield one key");
        }
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let range = TimeRange::new(2_000, 1_000);
        let err = partition_keys(range, BucketScheme::Daily).unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidRange {
                from_ms: 2_000,
                to_ms: 1_000
            }
        );
    }

    #[test]
    fn test_buckets_cover_window_without_gaps() {
        // Every day in the window must fall inside some emitted bucket.
        let range = TimeRange::new(ms(2024, 1, 10, 8, 0), ms(2024, 4, 2, 23, 0));

        let keys = partition_keys(range, BucketScheme::Weekly).unwrap();
        let mut day = date(2024, 1, 10);
        while day <= date(2024, 4, 2) {
            let covered = keys.iter().any(|k| {
                let start = k.date().unwrap();
                day >= start && day < start + Days::new(7)
            });
            assert!(covered, "no weekly bucket covers {day}");
            day = day + Days::new(1);
        }
    }
}
