//! Temporal partition bucketing
//!
//! Measurement tables shard rows into calendar buckets (day, ISO week,
//! month, year). [`partition_keys`] is the pure sequencing step of the
//! retrieval engine: window in, ordered bucket keys out.

pub mod scheme;
pub mod sequencer;

pub use scheme::{BucketScheme, PartitionKey};
pub use sequencer::{partition_keys, SequenceError};
