//! Time windows for measurement queries
//!
//! All measurement endpoints work on inclusive `[from_ms, to_ms]` windows in
//! epoch milliseconds. Calendar math elsewhere in the crate (partition
//! bucketing) is UTC.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One second in milliseconds
pub const SECOND_MS: i64 = 1_000;
/// One minute in milliseconds
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
/// One hour in milliseconds
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
/// One day in milliseconds
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Inclusive time window, in epoch milliseconds
///
/// Construction does not validate the bounds; the partition sequencer rejects
/// inverted windows when a query is actually issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Window start (inclusive)
    pub from_ms: i64,
    /// Window end (inclusive)
    pub to_ms: i64,
}

impl TimeRange {
    /// Create a new time window
    pub fn new(from_ms: i64, to_ms: i64) -> Self {
        Self { from_ms, to_ms }
    }

    /// Resolve optional request bounds into a concrete window
    ///
    /// A missing end defaults to now; a missing start defaults to 24 hours
    /// before the end.
    pub fn resolve(from_ms: Option<i64>, to_ms: Option<i64>) -> Self {
        let to_ms = to_ms.unwrap_or_else(|| Utc::now().timestamp_millis());
        let from_ms = from_ms.unwrap_or(to_ms - DAY_MS);
        Self { from_ms, to_ms }
    }

    /// Window ending now and spanning the last N hours
    pub fn last_hours(hours: i64) -> Self {
        let to_ms = Utc::now().timestamp_millis();
        Self {
            from_ms: to_ms - hours * HOUR_MS,
            to_ms,
        }
    }

    /// Window ending now and spanning the last N days
    pub fn last_days(days: i64) -> Self {
        Self::last_hours(days * 24)
    }

    /// Requested span in milliseconds
    pub fn span_ms(&self) -> i64 {
        self.to_ms - self.from_ms
    }

    /// Whether the bounds are ordered
    pub fn is_ordered(&self) -> bool {
        self.from_ms <= self.to_ms
    }

    /// Check if a timestamp falls inside the window (both ends inclusive)
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.from_ms && timestamp_ms <= self.to_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange::new(1_000, 2_000);

        assert!(!range.contains(999));
        assert!(range.contains(1_000));
        assert!(range.contains(2_000));
        assert!(!range.contains(2_001));
    }

    #[test]
    fn test_resolve_defaults() {
        let now = Utc::now().timestamp_millis();

        let range = TimeRange::resolve(None, None);
        assert!((range.to_ms - now).abs() < 1_000);
        assert_eq!(range.span_ms(), DAY_MS);

        let range = TimeRange::resolve(None, Some(5_000_000));
        assert_eq!(range.to_ms, 5_000_000);
        assert_eq!(range.from_ms, 5_000_000 - DAY_MS);

        let range = TimeRange::resolve(Some(1), Some(2));
        assert_eq!((range.from_ms, range.to_ms), (1, 2));
    }

    #[test]
    fn test_zero_span_is_ordered() {
        let range = TimeRange::new(42, 42);
        assert!(range.is_ordered());
        assert_eq!(range.span_ms(), 0);
    }
}
