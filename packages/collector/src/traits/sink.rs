//! Record sink trait: durable, resumable, append-only output.

use async_trait::async_trait;

use crate::error::SinkResult;
use crate::types::record::{PostRecord, ReplyRecord};

/// Append-only sink for collected records.
///
/// A record is written atomically: fully formed or not at all. The
/// sink is only ever appended to by the single pipeline task, so no
/// locking beyond open-append-flush is required.
///
/// # Implementations
///
/// - `CsvSink` - header + rows in two CSV files
/// - `MemorySink` (in [`crate::sinks`]) - in-memory, for tests
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Number of post records already persisted.
    ///
    /// Used as the resume offset at loop start: progress is recovered
    /// by counting rows, not by separate checkpoint state.
    async fn post_count(&self) -> SinkResult<u64>;

    /// Append one primary record.
    async fn append_post(&self, record: &PostRecord) -> SinkResult<()>;

    /// Append one reply record to the secondary stream.
    async fn append_reply(&self, record: &ReplyRecord) -> SinkResult<()>;
}
