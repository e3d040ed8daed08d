//! Partition fan-out execution
//!
//! One read per partition key, all in flight at once, joined with the first
//! error aborting the whole call. Rows come back concatenated in ascending
//! partition order; each partition keeps the store's own ordering and no
//! cross-partition re-sort is applied, so a descending query over several
//! partitions is descending within each partition only.

use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::fetch::error::{FetchError, FetchResult};
use crate::partition::{partition_keys, BucketScheme, PartitionKey};
use crate::store::{RowSet, Statement, StoreSession, Value};
use crate::time::TimeRange;

/// Executes one statement across every partition a window touches
#[derive(Clone)]
pub struct FanOutExecutor {
    session: Arc<dyn StoreSession>,
}

impl FanOutExecutor {
    pub fn new(session: Arc<dyn StoreSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<dyn StoreSession> {
        &self.session
    }

    /// Fan out `statement` over all partitions of `range` under `scheme`
    ///
    /// `binds` are the statement's fixed equality values; the partition key
    /// and window bounds are appended per partition. Fails fast: the first
    /// partition error aborts the call with no partial result.
    pub async fn fetch_all_partitions(
        &self,
        statement: &Statement,
        scheme: BucketScheme,
        range: TimeRange,
        binds: &[Value],
    ) -> FetchResult<RowSet> {
        let keys = partition_keys(range, scheme)?;
        let prepared = self
            .session
            .prepare(statement)
            .await
            .map_err(FetchError::Prepare)?;

        tracing::debug!(
            table = %statement.table,
            partitions = keys.len(),
            from_ms = range.from_ms,
            to_ms = range.to_ms,
            "fanning out partition reads"
        );

        let reads = keys.iter().map(|key| {
            let params = bind_params(statement, binds, key, range);
            let prepared = &prepared;
            async move { self.session.execute(prepared, &params).await }
        });

        let per_partition = try_join_all(reads)
            .await
            .map_err(FetchError::FetchFailed)?;

        Ok(per_partition.into_iter().flatten().collect())
    }
}

/// Bound values for one partition: equalities, key, window start, window end
fn bind_params(
    statement: &Statement,
    binds: &[Value],
    key: &PartitionKey,
    range: TimeRange,
) -> Vec<Value> {
    let mut params = binds.to_vec();
    if let Some(value) = key.to_value() {
        params.push(value);
    }
    if statement.time_column.is_some() {
        params.push(Value::Timestamp(range.from_ms));
        params.push(Value::Timestamp(range.to_ms));
    }
    params
}
