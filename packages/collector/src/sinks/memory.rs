//! In-memory sink for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::SinkResult;
use crate::traits::sink::RecordSink;
use crate::types::record::{PostRecord, ReplyRecord};

/// Append-only in-memory sink. Clones share the same storage.
#[derive(Default)]
pub struct MemorySink {
    posts: Arc<RwLock<Vec<PostRecord>>>,
    replies: Arc<RwLock<Vec<ReplyRecord>>>,
    /// Remaining number of appends to fail with an I/O error.
    fail_appends: Arc<AtomicU32>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed existing post records (simulates a resumed run).
    pub fn with_posts(self, posts: Vec<PostRecord>) -> Self {
        *self.posts.write().unwrap() = posts;
        self
    }

    /// Make the next `n` append calls fail with an I/O error.
    pub fn failing_appends(self, n: u32) -> Self {
        self.fail_appends.store(n, Ordering::SeqCst);
        self
    }

    /// Snapshot of the post records written so far.
    pub fn posts(&self) -> Vec<PostRecord> {
        self.posts.read().unwrap().clone()
    }

    /// Snapshot of the reply records written so far.
    pub fn replies(&self) -> Vec<ReplyRecord> {
        self.replies.read().unwrap().clone()
    }

    fn maybe_fail(&self) -> SinkResult<()> {
        let remaining = self.fail_appends.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_appends.store(remaining - 1, Ordering::SeqCst);
            return Err(std::io::Error::other("injected sink failure").into());
        }
        Ok(())
    }
}

impl Clone for MemorySink {
    fn clone(&self) -> Self {
        Self {
            posts: Arc::clone(&self.posts),
            replies: Arc::clone(&self.replies),
            fail_appends: Arc::clone(&self.fail_appends),
        }
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn post_count(&self) -> SinkResult<u64> {
        Ok(self.posts.read().unwrap().len() as u64)
    }

    async fn append_post(&self, record: &PostRecord) -> SinkResult<()> {
        self.maybe_fail()?;
        self.posts.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn append_reply(&self, record: &ReplyRecord) -> SinkResult<()> {
        self.maybe_fail()?;
        self.replies.write().unwrap().push(record.clone());
        Ok(())
    }
}
