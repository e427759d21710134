//! Backoff pacer: jittered waits that keep the collector inside an
//! unknown, dynamically-signalled rate limit.
//!
//! Jitter avoids synchronized retry herds and keeps request timing
//! unpredictable to the remote service. Every wait is floored at one
//! second.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::types::config::{PacingConfig, WaitRange};

/// Minimum wait returned by any jittered computation.
const FLOOR: Duration = Duration::from_secs(1);

/// Computes jittered wait durations for the pipeline's three pacing
/// situations plus rate-limit reset waits.
#[derive(Debug, Clone)]
pub struct Pacer {
    config: PacingConfig,
}

impl Pacer {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    /// Scale a base duration by a uniform factor in `[1 - J, 1 + J]`,
    /// flooring the result at one second.
    pub fn jittered(&self, base: Duration) -> Duration {
        let j = self.config.jitter;
        let factor = if j > 0.0 {
            rand::rng().random_range(1.0 - j..=1.0 + j)
        } else {
            1.0
        };
        let secs = (base.as_secs_f64() * factor).max(FLOOR.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Wait before processing the next post.
    pub fn post_wait(&self) -> Duration {
        self.jittered(draw(self.config.per_post))
    }

    /// Wait before fetching the next page.
    pub fn page_wait(&self) -> Duration {
        self.jittered(draw(self.config.per_page))
    }

    /// Session cool-down once the per-session ceiling is reached.
    pub fn session_break(&self) -> Duration {
        self.jittered(draw(self.config.session_break))
    }

    /// Jittered time until a rate-limit reset timestamp.
    ///
    /// Never negative: a reset in the past clamps to zero, which the
    /// jitter floor then lifts to one second.
    pub fn reset_wait(&self, reset_at: DateTime<Utc>) -> Duration {
        let remaining = (reset_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        self.jittered(remaining)
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(PacingConfig::default())
    }
}

/// Draw a base duration uniformly from an inclusive range of seconds.
fn draw(range: WaitRange) -> Duration {
    let secs = if range.min_secs == range.max_secs {
        range.min_secs
    } else {
        rand::rng().random_range(range.min_secs..=range.max_secs)
    };
    Duration::from_secs(secs)
}
