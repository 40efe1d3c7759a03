//! crates/ta_pipeline/src/build_result.rs
//! Assemble the serializable result document from a solved assignment.

use serde::{Deserialize, Serialize};

use ta_algo::Assignment;
use ta_core::{PreferenceStore, SimilarityThreshold};

use crate::PipelineError;

/// One participant's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub name: String,
    pub topic: String,
    /// 1-based position of `topic` in the participant's ranking; `None` when unranked.
    pub rank: Option<u32>,
}

/// Result artifact written by `--out`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub input_sha256: String,
    pub seed: u64,
    pub similarity: SimilarityThreshold,
    pub topics: Vec<String>,
    pub assignments: Vec<AssignmentRow>,
    pub total_weight: u64,
}

impl ResultDoc {
    /// Number of participants placed on one of their ranked topics.
    pub fn ranked_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.rank.is_some()).count()
    }
}

pub fn build_result(
    store: &PreferenceStore,
    assignment: &Assignment,
    seed: u64,
    similarity: SimilarityThreshold,
    input_sha256: String,
) -> Result<ResultDoc, PipelineError> {
    let mut rows = Vec::with_capacity(assignment.len());
    for a in &assignment.assignments {
        let topic = store
            .topic_name(a.topic)
            .ok_or_else(|| PipelineError::Build(format!("topic index {} out of range", a.topic)))?;
        let rank = store
            .ranking(&a.name)
            .ok_or_else(|| PipelineError::Build(format!("unknown participant \"{}\"", a.name)))?
            .rank_of(a.topic)
            .map(|r| r as u32 + 1);
        rows.push(AssignmentRow {
            name: a.name.clone(),
            topic: topic.to_string(),
            rank,
        });
    }

    Ok(ResultDoc {
        input_sha256,
        seed,
        similarity,
        topics: store.topics().to_vec(),
        assignments: rows,
        total_weight: assignment.total_weight,
    })
}
