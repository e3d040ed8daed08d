//! Rollup frequencies
//!
//! Each pre-aggregation frequency is bound to one bucketing scheme and one
//! family of rollup tables. The store's frequency catalogs spell frequencies
//! as display tokens (`"5 Min"`, `"Hourly"`); the API addresses them with
//! compact slugs (`5min`, `hourly`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::partition::BucketScheme;

/// Pre-aggregation granularity of a rollup table family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    OneSec,
    OneMin,
    FiveMin,
    TenMin,
    FifteenMin,
    TwentyMin,
    ThirtyMin,
    Hourly,
    Daily,
}

/// All frequencies, finest first
pub const ALL_FREQUENCIES: [Frequency; 9] = [
    Frequency::OneSec,
    Frequency::OneMin,
    Frequency::FiveMin,
    Frequency::TenMin,
    Frequency::FifteenMin,
    Frequency::TwentyMin,
    Frequency::ThirtyMin,
    Frequency::Hourly,
    Frequency::Daily,
];

impl Frequency {
    /// Token spelling used by the store's frequency catalogs
    pub fn token(&self) -> &'static str {
        match self {
            Frequency::OneSec => "1 Sec",
            Frequency::OneMin => "1 Min",
            Frequency::FiveMin => "5 Min",
            Frequency::TenMin => "10 Min",
            Frequency::FifteenMin => "15 Min",
            Frequency::TwentyMin => "20 Min",
            Frequency::ThirtyMin => "30 Min",
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
        }
    }

    /// Parse a catalog token; unrecognized tokens yield `None`
    pub fn from_token(token: &str) -> Option<Frequency> {
        ALL_FREQUENCIES.into_iter().find(|f| f.token() == token)
    }

    /// URL slug for API paths
    pub fn slug(&self) -> &'static str {
        match self {
            Frequency::OneSec => "1sec",
            Frequency::OneMin => "1min",
            Frequency::FiveMin => "5min",
            Frequency::TenMin => "10min",
            Frequency::FifteenMin => "15min",
            Frequency::TwentyMin => "20min",
            Frequency::ThirtyMin => "30min",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
        }
    }

    /// Bucketing scheme of this frequency's rollup tables
    pub fn scheme(&self) -> BucketScheme {
        match self {
            Frequency::OneSec => BucketScheme::Daily,
            Frequency::OneMin => BucketScheme::Weekly,
            Frequency::FiveMin
            | Frequency::TenMin
            | Frequency::FifteenMin
            | Frequency::TwentyMin
            | Frequency::ThirtyMin => BucketScheme::Monthly,
            Frequency::Hourly | Frequency::Daily => BucketScheme::Yearly,
        }
    }

    pub(crate) fn table_prefix(&self) -> &'static str {
        match self {
            Frequency::OneSec => "one_sec",
            Frequency::OneMin => "one_min",
            Frequency::FiveMin => "five_min",
            Frequency::TenMin => "ten_min",
            Frequency::FifteenMin => "fifteen_min",
            Frequency::TwentyMin => "twenty_min",
            Frequency::ThirtyMin => "thirty_min",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
        }
    }

    /// Single-parameter rollup table for this frequency
    pub fn single_table(&self) -> String {
        format!("{}_single_measurements_by_sensor", self.table_prefix())
    }

    /// Profile-parameter rollup table (adds a vertical position axis)
    pub fn profile_table(&self) -> String {
        format!("{}_profile_measurements_by_sensor", self.table_prefix())
    }

    /// Parameter-group rollup table for this frequency
    pub fn group_table(&self) -> String {
        format!("{}_group_measurements_by_station", self.table_prefix())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unrecognized resolution slug in an API path
#[derive(Debug, Error)]
#[error("unknown resolution: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FREQUENCIES
            .into_iter()
            .find(|f| f.slug() == s)
            .ok_or_else(|| ParseFrequencyError(s.to_string()))
    }
}
