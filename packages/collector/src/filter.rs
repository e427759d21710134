//! Engagement filter: a pure predicate over a post's metrics.

use serde::{Deserialize, Serialize};

use crate::types::post::Engagement;

/// Threshold predicate deciding whether a post is worth collecting.
///
/// Pure function of the metrics: same input, same answer, no side
/// effects. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngagementFilter {
    /// Reply count within an inclusive band.
    ///
    /// Targets posts with some conversation but not viral pile-ons.
    ReplyBand { min: u64, max: u64 },

    /// Passes when any one of the minimums is met.
    AnyOf {
        min_reposts: u64,
        min_favorites: u64,
        min_replies: u64,
    },
}

impl EngagementFilter {
    /// Evaluate the predicate against a post's metrics.
    pub fn passes(&self, metrics: &Engagement) -> bool {
        match self {
            EngagementFilter::ReplyBand { min, max } => {
                metrics.replies >= *min && metrics.replies <= *max
            }
            EngagementFilter::AnyOf {
                min_reposts,
                min_favorites,
                min_replies,
            } => {
                metrics.reposts >= *min_reposts
                    || metrics.favorites >= *min_favorites
                    || metrics.replies >= *min_replies
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_band_bounds_inclusive() {
        let filter = EngagementFilter::ReplyBand { min: 5, max: 8 };

        assert!(!filter.passes(&Engagement::new(0, 0, 4)));
        assert!(filter.passes(&Engagement::new(0, 0, 5)));
        assert!(filter.passes(&Engagement::new(0, 0, 8)));
        assert!(!filter.passes(&Engagement::new(0, 0, 9)));
    }

    #[test]
    fn test_any_of_is_a_disjunction() {
        let filter = EngagementFilter::AnyOf {
            min_reposts: 10,
            min_favorites: 50,
            min_replies: 5,
        };

        assert!(filter.passes(&Engagement::new(10, 0, 0)));
        assert!(filter.passes(&Engagement::new(0, 50, 0)));
        assert!(filter.passes(&Engagement::new(0, 0, 5)));
        assert!(!filter.passes(&Engagement::new(9, 49, 4)));
    }

    #[test]
    fn test_filter_is_deterministic() {
        let filter = EngagementFilter::ReplyBand { min: 5, max: 8 };
        let metrics = Engagement::new(2, 7, 6);

        for _ in 0..10 {
            assert!(filter.passes(&metrics));
        }
    }
}
