//! Resumable collection loop: fetch → filter → classify → persist → wait.
//!
//! One logical task runs the whole pipeline end to end; the only
//! suspension points are pacer sleeps and the network round-trips.
//! Transient trouble is contained here, logged, and retried after a
//! recovery sleep; only authentication failures and an exhausted retry
//! ceiling cross the boundary.

use tracing::{debug, info, warn};

use crate::classify::Classifier;
use crate::error::{CollectorError, Result};
use crate::pacing::Pacer;
use crate::traits::sink::RecordSink;
use crate::traits::source::ContentSource;
use crate::types::config::CollectorConfig;
use crate::types::post::Page;
use crate::types::record::{PostRecord, ReplyRecord};
use crate::walker::PageWalker;

/// Outcome of a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectResult {
    /// Total posts persisted, including records from earlier resumed
    /// runs.
    pub collected: u64,

    /// Whether the target was reached (false means the source ran dry
    /// first, still a normal completion).
    pub reached_target: bool,

    /// Pages fetched during this run.
    pub pages_fetched: u64,

    /// Session cool-downs taken during this run.
    pub session_breaks: u32,
}

/// Mutable per-run counters. Recovered on restart by counting sink
/// rows, never persisted.
struct RunState {
    collected: u64,
    session_items: u32,
}

/// Collect posts until the target count is reached or the source is
/// exhausted.
///
/// On start the resume offset is read from the sink's existing row
/// count, so sequence numbers continue contiguously across restarts.
pub async fn collect<S, C, K>(
    config: &CollectorConfig,
    source: &S,
    classifier: &C,
    sink: &K,
) -> Result<CollectResult>
where
    S: ContentSource,
    C: Classifier,
    K: RecordSink,
{
    config.validate()?;
    let pacer = Pacer::new(config.pacing.clone());
    let mut walker = PageWalker::new(source, &pacer, &config.query, config.retry_ceiling);

    let resume = sink.post_count().await?;
    if resume > 0 {
        info!(resume, "Resuming from existing records");
    }

    let mut state = RunState {
        collected: resume,
        session_items: 0,
    };
    let mut pages_fetched: u64 = 0;
    let mut session_breaks: u32 = 0;

    while state.collected < config.target_count {
        // Long-window politeness: cool down once the session ceiling
        // is hit, before fetching further pages.
        if state.session_items >= config.session_ceiling {
            let wait = pacer.session_break();
            info!(
                wait_secs = wait.as_secs(),
                "Session ceiling reached, taking a break"
            );
            tokio::time::sleep(wait).await;
            state.session_items = 0;
            session_breaks += 1;
        }

        let page = match walker.next_page().await {
            Ok(Some(page)) => page,
            Ok(None) => break,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Transient fetch error, backing off");
                tokio::time::sleep(pacer.jittered(config.recovery_wait())).await;
                continue;
            }
        };
        pages_fetched += 1;

        match process_page(&page, config, &pacer, &walker, classifier, sink, &mut state).await {
            Ok(()) => {}
            Err(e) => {
                if let CollectorError::Source(source_err) = &e {
                    if source_err.is_fatal() {
                        return Err(e);
                    }
                }
                // The rest of this page is abandoned; the walker keeps
                // its cursor, so the run continues from the next page.
                warn!(error = %e, "Error while processing page, backing off");
                tokio::time::sleep(pacer.jittered(config.recovery_wait())).await;
            }
        }

        info!(
            collected = state.collected,
            target = config.target_count,
            "Progress"
        );
    }

    let reached_target = state.collected >= config.target_count;
    info!(
        collected = state.collected,
        reached_target, "Collection finished"
    );

    Ok(CollectResult {
        collected: state.collected,
        reached_target,
        pages_fetched,
        session_breaks,
    })
}

/// Process one page: filter, classify, persist, pace.
///
/// A post's own record is always written before any of its reply
/// records. The collected counter only advances after a successful
/// append, keeping sequence numbers gap-free even when a write fails.
async fn process_page<S, C, K>(
    page: &Page,
    config: &CollectorConfig,
    pacer: &Pacer,
    walker: &PageWalker<'_, S>,
    classifier: &C,
    sink: &K,
    state: &mut RunState,
) -> Result<()>
where
    S: ContentSource,
    C: Classifier,
    K: RecordSink,
{
    for post in &page.posts {
        if state.collected >= config.target_count {
            break;
        }
        if !config.filter.passes(&post.metrics) {
            continue;
        }

        let category = classifier.classify(&post.text).await?;

        let seq = state.collected + 1;
        let record = PostRecord::from_post(seq, post, category);
        sink.append_post(&record).await?;
        state.collected = seq;
        state.session_items += 1;

        if config.collect_replies {
            let replies = walker.fetch_replies(&post.id).await?;
            debug!(post_id = %post.id, replies = replies.len(), "Persisting replies");
            for reply in &replies {
                sink.append_reply(&ReplyRecord::from_reply(post, category, reply))
                    .await?;
            }
        }

        let wait = pacer.post_wait();
        debug!(wait_secs = wait.as_secs(), "Waiting before next post");
        tokio::time::sleep(wait).await;
    }

    Ok(())
}
