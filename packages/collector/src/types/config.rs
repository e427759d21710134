//! Configuration for the collection pipeline.
//!
//! All thresholds and wait ranges live here, validated once, instead
//! of being re-declared at every call site. The binary fills this from
//! its settings source; the library never reads the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::EngagementFilter;

/// Inclusive range of base wait durations, in whole seconds.
///
/// Each wait is drawn uniformly from `[min_secs, max_secs]` before
/// jitter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitRange {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl WaitRange {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self { min_secs, max_secs }
    }

    /// A fixed wait (min == max).
    pub fn fixed(secs: u64) -> Self {
        Self::new(secs, secs)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min_secs > self.max_secs {
            return Err(ConfigError::InvertedWaitRange {
                name,
                min: self.min_secs,
                max: self.max_secs,
            });
        }
        Ok(())
    }
}

/// Wait ranges and jitter for the backoff pacer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Jitter fraction J: each wait is scaled by a uniform factor in
    /// `[1 - J, 1 + J]`, then floored at one second.
    pub jitter: f64,

    /// Wait between two collected posts.
    pub per_post: WaitRange,

    /// Wait between two page fetches.
    pub per_page: WaitRange,

    /// Session cool-down once the session ceiling is reached.
    pub session_break: WaitRange,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            jitter: 0.2,
            per_post: WaitRange::new(30, 90),
            per_page: WaitRange::new(60, 180),
            session_break: WaitRange::new(900, 1800),
        }
    }
}

impl PacingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.jitter) {
            return Err(ConfigError::JitterOutOfRange(self.jitter));
        }
        self.per_post.validate("per_post")?;
        self.per_page.validate("per_page")?;
        self.session_break.validate("session_break")?;
        Ok(())
    }
}

/// Configuration for a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Opaque search query passed verbatim to the content source.
    pub query: String,

    /// Stop once this many posts have been collected (across resumed
    /// runs).
    pub target_count: u64,

    /// Posts collected per session before a session break.
    pub session_ceiling: u32,

    /// Engagement predicate a post must pass to be collected.
    pub filter: EngagementFilter,

    /// Whether to fetch and persist each collected post's replies.
    pub collect_replies: bool,

    /// Wait ranges and jitter.
    pub pacing: PacingConfig,

    /// Attempts allowed for one request under repeated rate limiting
    /// before giving up with a fatal error.
    pub retry_ceiling: u32,

    /// Fixed base sleep after a transient error before the loop
    /// resumes.
    pub recovery_wait_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            target_count: 1000,
            session_ceiling: 100,
            filter: EngagementFilter::ReplyBand { min: 5, max: 8 },
            collect_replies: true,
            pacing: PacingConfig::default(),
            retry_ceiling: 5,
            recovery_wait_secs: 60,
        }
    }
}

impl CollectorConfig {
    /// Create a config for a query with default pacing and thresholds.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the target post count.
    pub fn with_target(mut self, target: u64) -> Self {
        self.target_count = target;
        self
    }

    /// Set the session ceiling.
    pub fn with_session_ceiling(mut self, ceiling: u32) -> Self {
        self.session_ceiling = ceiling;
        self
    }

    /// Set the engagement filter.
    pub fn with_filter(mut self, filter: EngagementFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Disable reply collection.
    pub fn without_replies(mut self) -> Self {
        self.collect_replies = false;
        self
    }

    /// Set the pacing configuration.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the rate-limit retry ceiling.
    pub fn with_retry_ceiling(mut self, ceiling: u32) -> Self {
        self.retry_ceiling = ceiling;
        self
    }

    /// Set the transient-error recovery wait.
    pub fn with_recovery_wait(mut self, secs: u64) -> Self {
        self.recovery_wait_secs = secs;
        self
    }

    /// Base recovery wait as a `Duration`.
    pub fn recovery_wait(&self) -> Duration {
        Duration::from_secs(self.recovery_wait_secs)
    }

    /// Validate all numeric fields. Called once at loop start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        if self.session_ceiling == 0 {
            return Err(ConfigError::ZeroSessionCeiling);
        }
        if self.retry_ceiling == 0 {
            return Err(ConfigError::ZeroRetryCeiling);
        }
        self.pacing.validate()
    }
}
