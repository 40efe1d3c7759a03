//! Topic resolution: map a free-text preference token onto a topic index.
//!
//! Policy:
//! 1) any exact score (1.0) wins immediately, first occurrence first;
//! 2) a single topic is accepted iff its score reaches the threshold;
//! 3) otherwise the best topic is accepted iff it reaches the threshold AND
//!    leads the runner-up by at least `AMBIGUITY_MARGIN`.
//!
//! The resolver is context-free: callers attach line numbers to failures.

use ta_core::{SimilarityThreshold, TopicId};

use crate::similarity::{JaroWinkler, Similarity};

/// Minimum lead of the best candidate over the runner-up.
pub const AMBIGUITY_MARGIN: f64 = 0.1;

/// A scored candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored {
    pub topic: TopicId,
    pub score: f64,
}

/// Why a token could not be mapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnresolvedReason {
    /// The topic list is empty.
    NoTopics,
    /// The best score is under the threshold.
    BelowThreshold { best: Scored },
    /// Two topics are too close to call.
    Ambiguous { best: Scored, runner_up: Scored },
}

/// Outcome of resolving one token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    Exact(TopicId),
    /// Accepted fuzzy match; callers surface this as a "corrected preference" notice.
    Corrected { topic: TopicId, score: f64 },
    Unresolved(UnresolvedReason),
}

impl Resolution {
    #[inline]
    pub fn topic(&self) -> Option<TopicId> {
        match *self {
            Resolution::Exact(t) | Resolution::Corrected { topic: t, .. } => Some(t),
            Resolution::Unresolved(_) => None,
        }
    }

    #[inline]
    pub fn is_corrected(&self) -> bool {
        matches!(self, Resolution::Corrected { .. })
    }
}

/// Resolve with the default Jaro–Winkler metric.
pub fn resolve(token: &str, topics: &[String], threshold: SimilarityThreshold) -> Resolution {
    resolve_with(&JaroWinkler, token, topics, threshold)
}

/// Resolve with any metric.
pub fn resolve_with<S: Similarity + ?Sized>(
    metric: &S,
    token: &str,
    topics: &[String],
    threshold: SimilarityThreshold,
) -> Resolution {
    let mut first: Option<Scored> = None;
    let mut second: Option<Scored> = None;

    for (i, name) in topics.iter().enumerate() {
        let topic = TopicId::new(i as u32);
        let score = metric.score(token, name);
        if score == 1.0 {
            return Resolution::Exact(topic);
        }
        let cand = Scored { topic, score };
        match first {
            Some(f) if score <= f.score => {
                if second.map_or(true, |s| score > s.score) {
                    second = Some(cand);
                }
            }
            _ => {
                second = first;
                first = Some(cand);
            }
        }
    }

    let Some(best) = first else {
        return Resolution::Unresolved(UnresolvedReason::NoTopics);
    };
    if best.score < threshold.value() {
        return Resolution::Unresolved(UnresolvedReason::BelowThreshold { best });
    }
    if let Some(runner_up) = second {
        if best.score - runner_up.score < AMBIGUITY_MARGIN {
            return Resolution::Unresolved(UnresolvedReason::Ambiguous { best, runner_up });
        }
    }

    Resolution::Corrected {
        topic: best.topic,
        score: best.score,
    }
}
