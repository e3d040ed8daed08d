//! Fan-out retrieval over partitioned rollup tables
//!
//! The fixed-resolution read path: build a statement for one rollup table
//! family ([`template`]), sequence the window into partition keys and read
//! them all concurrently ([`executor`]). Fixed-resolution endpoints call
//! [`FanOutExecutor::fetch_all_partitions`] directly; the adaptive path in
//! [`crate::resolution`] layers frequency selection on top.

pub mod error;
pub mod executor;
pub mod template;

pub use error::{FetchError, FetchResult};
pub use executor::FanOutExecutor;
pub use template::{group_statement, profile_statement, single_statement, DataSet};
