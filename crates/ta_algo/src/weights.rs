//! Rank → weight transform.
//!
//! With `T` topics, rank `r` (0-based) is worth `T - r`; unranked topics are
//! worth 0. The scale is strictly decreasing, so for any `T` a first choice
//! outweighs a second choice, which outweighs a third, and so on.

use std::collections::BTreeMap;

use ta_core::TopicId;

/// Topic → weight; absent keys weigh 0.
pub type WeightMap = BTreeMap<TopicId, u64>;

pub fn ranks_to_weights(topic_count: usize, ranking: &[TopicId]) -> WeightMap {
    debug_assert!(ranking.len() <= topic_count, "ranking longer than topic list");
    ranking
        .iter()
        .enumerate()
        .map(|(rank, &topic)| (topic, topic_count.saturating_sub(rank) as u64))
        .collect()
}

/// Weight lookup with the implicit zero.
#[inline]
pub fn weight_of(weights: &WeightMap, topic: TopicId) -> u64 {
    weights.get(&topic).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_decay_from_topic_count() {
        let w = ranks_to_weights(3, &[TopicId::new(2), TopicId::new(0)]);
        assert_eq!(w.len(), 2);
        assert_eq!(w[&TopicId::new(2)], 3);
        assert_eq!(w[&TopicId::new(0)], 2);
        assert_eq!(weight_of(&w, TopicId::new(1)), 0);
    }

    #[test]
    fn empty_ranking_is_all_zero() {
        let w = ranks_to_weights(5, &[]);
        assert!(w.is_empty());
        assert_eq!(weight_of(&w, TopicId::new(4)), 0);
    }

    #[test]
    fn full_ranking_is_strictly_decreasing() {
        let ranking: Vec<TopicId> = [3, 1, 4, 0, 2].into_iter().map(TopicId::new).collect();
        let w = ranks_to_weights(5, &ranking);
        let in_rank_order: Vec<u64> = ranking.iter().map(|t| w[t]).collect();
        assert_eq!(in_rank_order, vec![5, 4, 3, 2, 1]);
    }
}
