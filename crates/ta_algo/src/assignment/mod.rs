//! Optimal 1:1 assignment of participants to topics.
//!
//! Contract:
//! - `participants <= topics`, otherwise the instance is infeasible and nothing is solved.
//! - Real participants are shuffled with the caller's seeded RNG before padding, so
//!   equal-cost ties are not broken in favour of input order. The optimum *cost*
//!   does not depend on the seed.
//! - Ghost rows (all-zero weights) pad the matrix to `topics × topics`.
//! - cost = −weight; the Hungarian method returns a certified optimal bijection.
//! - Ghost rows are dropped; output follows the input participant order.

mod hungarian;

use thiserror::Error;

use ta_core::{PreferenceStore, ShuffleRng, TopicId};

use crate::weights::{ranks_to_weights, weight_of, WeightMap};

pub use hungarian::{min_cost_matching, verify_optimal, CostMatrix, Matching};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("infeasible: {participants} participants but only {topics} topics")]
    Infeasible { participants: usize, topics: usize },
    #[error("cost matrix is not square ({rows} rows, row of {cols} columns)")]
    NotSquare { rows: usize, cols: usize },
    #[error("solver did not produce an optimal complete matching: {0}")]
    NotOptimal(&'static str),
    #[error("topic index {0} does not fit the topic id range")]
    TopicRange(usize),
}

/// One real participant's assigned topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedTopic {
    pub name: String,
    pub topic: TopicId,
    /// Weight this participant gave the topic (0 if unranked).
    pub weight: u64,
}

/// Solver output, in input participant order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pub assignments: Vec<AssignedTopic>,
    pub total_weight: u64,
}

impl Assignment {
    pub fn topic_of(&self, name: &str) -> Option<TopicId> {
        self.assignments.iter().find(|a| a.name == name).map(|a| a.topic)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Solve for `topic_count` topics and the given `(name, weights)` rows.
pub fn solve(
    topic_count: usize,
    participants: &[(String, WeightMap)],
    rng: &mut ShuffleRng,
) -> Result<Assignment, SolveError> {
    let n = topic_count;
    if participants.len() > n {
        return Err(SolveError::Infeasible {
            participants: participants.len(),
            topics: n,
        });
    }

    // Row order: shuffled input positions, then ghosts (None).
    let mut order: Vec<usize> = (0..participants.len()).collect();
    rng.shuffle_in_place(&mut order);
    let mut rows: Vec<Option<usize>> = order.into_iter().map(Some).collect();
    rows.resize(n, None);

    let mut cost = CostMatrix::zeros(n);
    for (r, slot) in rows.iter().enumerate() {
        let Some(p) = *slot else { continue };
        for (&topic, &w) in &participants[p].1 {
            if topic.index() >= n {
                return Err(SolveError::TopicRange(topic.index()));
            }
            cost.set(r, topic.index(), -(w as i64));
        }
    }

    tracing::debug!(
        topics = n,
        participants = participants.len(),
        ghosts = n - participants.len(),
        "solving assignment"
    );
    let matching = min_cost_matching(&cost)?;

    let mut picked: Vec<Option<TopicId>> = vec![None; participants.len()];
    for (r, slot) in rows.iter().enumerate() {
        if let Some(p) = *slot {
            let col = matching.row_to_col[r];
            picked[p] = Some(TopicId::from_index(col).map_err(|_| SolveError::TopicRange(col))?);
        }
    }

    let mut out = Assignment::default();
    for ((name, weights), topic) in participants.iter().zip(picked) {
        let topic = topic.ok_or(SolveError::NotOptimal("participant left unassigned"))?;
        let weight = weight_of(weights, topic);
        out.total_weight += weight;
        out.assignments.push(AssignedTopic {
            name: name.clone(),
            topic,
            weight,
        });
    }

    debug_assert_eq!(out.total_weight as i64, -matching.total_cost);
    Ok(out)
}

/// Weight every participant of `store` and solve.
pub fn solve_store(store: &PreferenceStore, rng: &mut ShuffleRng) -> Result<Assignment, SolveError> {
    let n = store.topic_count();
    let rows: Vec<(String, WeightMap)> = store
        .participants()
        .map(|(name, ranking)| (name.to_string(), ranks_to_weights(n, ranking.as_slice())))
        .collect();
    solve(n, &rows, rng)
}
