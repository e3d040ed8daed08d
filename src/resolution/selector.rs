//! Adaptive resolution selection
//!
//! Given the rollup frequencies a (station, group) actually has and the
//! requested window, pick exactly one frequency, then fan out over that
//! frequency's partitions. Selection is a table lookup: the span falls into
//! one of nine fixed duration buckets, each bucket carries a fixed priority
//! order, and the first priority present in the available set wins. No
//! available candidate is an empty result, never an error.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::fetch::{group_statement, FanOutExecutor, FetchError, FetchResult};
use crate::resolution::frequency::Frequency::{
    self, Daily, FifteenMin, FiveMin, Hourly, OneMin, OneSec, TenMin, ThirtyMin, TwentyMin,
};
use crate::series::SeriesMap;
use crate::store::{RowSet, SortOrder, StoreSession, Value};
use crate::time::{TimeRange, DAY_MS, HOUR_MS, MINUTE_MS};

/// Upper span edges of the first eight duration buckets; longer spans fall
/// into the ninth
const SPAN_EDGES_MS: [i64; 8] = [
    5 * MINUTE_MS,
    5 * HOUR_MS,
    DAY_MS,
    2 * DAY_MS,
    3 * DAY_MS,
    4 * DAY_MS,
    6 * DAY_MS,
    12 * DAY_MS,
];

/// Candidate order per span bucket, finest acceptable resolution first
const PRIORITY: [[Frequency; 9]; 9] = [
    // < 5 min
    [OneSec, OneMin, FiveMin, TenMin, FifteenMin, TwentyMin, ThirtyMin, Hourly, Daily],
    // 5 min .. 5 h
    [OneMin, OneSec, FiveMin, TenMin, FifteenMin, TwentyMin, ThirtyMin, Hourly, Daily],
    // 5 h .. 1 d
    [FiveMin, OneMin, OneSec, TenMin, FifteenMin, TwentyMin, ThirtyMin, Hourly, Daily],
    // 1 d .. 2 d
    [TenMin, FiveMin, OneMin, OneSec, FifteenMin, TwentyMin, ThirtyMin, Hourly, Daily],
    // 2 d .. 3 d
    [FifteenMin, TenMin, FiveMin, OneMin, OneSec, TwentyMin, ThirtyMin, Hourly, Daily],
    // 3 d .. 4 d
    [TwentyMin, FifteenMin, TenMin, FiveMin, OneMin, OneSec, ThirtyMin, Hourly, Daily],
    // 4 d .. 6 d
    [ThirtyMin, TwentyMin, FifteenMin, TenMin, FiveMin, OneMin, OneSec, Hourly, Daily],
    // 6 d .. 12 d
    [Hourly, ThirtyMin, TwentyMin, FifteenMin, TenMin, FiveMin, OneMin, OneSec, Daily],
    // >= 12 d
    [Daily, Hourly, ThirtyMin, TwentyMin, FifteenMin, TenMin, FiveMin, OneMin, OneSec],
];

fn span_bucket(span_ms: i64) -> usize {
    SPAN_EDGES_MS
        .iter()
        .position(|edge| span_ms < *edge)
        .unwrap_or(SPAN_EDGES_MS.len())
}

/// Pick the best available frequency for a window; pure
pub fn choose(available: &[Frequency], range: TimeRange) -> Option<Frequency> {
    PRIORITY[span_bucket(range.span_ms())]
        .iter()
        .copied()
        .find(|candidate| available.contains(candidate))
}

/// Like [`choose`], over raw catalog tokens; unrecognized tokens are skipped
pub fn choose_from_tokens<S: AsRef<str>>(tokens: &[S], range: TimeRange) -> Option<Frequency> {
    let available: Vec<Frequency> = tokens
        .iter()
        .filter_map(|token| Frequency::from_token(token.as_ref()))
        .collect();
    choose(&available, range)
}

/// Output shape for group retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFormat {
    /// Flat rollup rows
    #[default]
    Rows,
    /// Per-parameter chart series
    Chart,
}

/// Group retrieval result in the requested shape
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GroupData {
    Rows(RowSet),
    Chart(SeriesMap),
}

impl GroupData {
    fn empty(format: GroupFormat) -> Self {
        match format {
            GroupFormat::Rows => GroupData::Rows(Vec::new()),
            GroupFormat::Chart => GroupData::Chart(SeriesMap::new()),
        }
    }
}

/// One group retrieval request
#[derive(Debug, Clone)]
pub struct GroupRequest {
    pub station_id: Uuid,
    pub group_id: Uuid,
    pub qc_level: i32,
    pub range: TimeRange,
    pub order: SortOrder,
    pub format: GroupFormat,
}

/// Adaptive group retrieval: availability lookup, selection, fan-out
#[derive(Clone)]
pub struct ResolutionSelector {
    executor: FanOutExecutor,
    catalog: Catalog,
}

impl ResolutionSelector {
    pub fn new(session: Arc<dyn StoreSession>) -> Self {
        Self {
            executor: FanOutExecutor::new(Arc::clone(&session)),
            catalog: Catalog::new(session),
        }
    }

    /// Full adaptive path for one (station, group) request
    ///
    /// Fetches the group's frequency set fresh, chooses a resolution and
    /// delegates to the fan-out. An empty or all-unknown frequency set
    /// answers with an empty result in the requested shape.
    pub async fn select_and_fetch(&self, request: &GroupRequest) -> FetchResult<GroupData> {
        let tokens = self
            .catalog
            .group_frequency_tokens(request.station_id, request.group_id)
            .await
            .map_err(FetchError::FetchFailed)?;

        let Some(frequency) = choose_from_tokens(&tokens, request.range) else {
            tracing::debug!(
                station_id = %request.station_id,
                group_id = %request.group_id,
                "no rollup frequency available for group"
            );
            return Ok(GroupData::empty(request.format));
        };

        tracing::debug!(
            station_id = %request.station_id,
            group_id = %request.group_id,
            %frequency,
            span_ms = request.range.span_ms(),
            "resolved adaptive resolution"
        );

        self.fetch_group(frequency, request).await
    }

    /// Fixed-resolution group fan-out in the requested shape
    ///
    /// Chart output forces ascending order so series come out plot-ready.
    pub async fn fetch_group(
        &self,
        frequency: Frequency,
        request: &GroupRequest,
    ) -> FetchResult<GroupData> {
        let order = match request.format {
            GroupFormat::Chart => SortOrder::Asc,
            GroupFormat::Rows => request.order,
        };
        let statement = group_statement(frequency, order);
        let binds = [
            Value::Uuid(request.station_id),
            Value::Uuid(request.group_id),
            Value::Int(request.qc_level),
        ];

        let rows = self
            .executor
            .fetch_all_partitions(&statement, frequency.scheme(), request.range, &binds)
            .await?;

        Ok(match request.format {
            GroupFormat::Rows => GroupData::Rows(rows),
            GroupFormat::Chart => GroupData::Chart(SeriesMap::from_rows(&rows, request.qc_level)),
        })
    }
}
