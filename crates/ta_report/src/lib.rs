//! ta_report: offline report model + renderers (text, JSON).
//!
//! Rules:
//! - No I/O. Callers hand over the store and the `ResultDoc` already in memory.
//! - No recomputation: ranks and totals are read from the result, never re-derived.
//! - Stable section order: topics, preferences, assignments, footer.

#![deny(unsafe_code)]

pub mod render_text;
#[cfg(feature = "render_json")]
pub mod render_json;

use thiserror::Error;

use ta_core::PreferenceStore;
use ta_pipeline::ResultDoc;

pub use render_text::render_text;
#[cfg(feature = "render_json")]
pub use render_json::render_json;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("participant \"{0}\" in result is missing from the preference store")]
    UnknownParticipant(String),
    #[error("result lists {result} topics but the store has {store}")]
    TopicMismatch { result: usize, store: usize },
    #[error("render: {0}")]
    Render(String),
}

// ===== Model =====

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    pub topics: Vec<String>,
    pub preferences: Vec<ParticipantPrefs>,
    pub assignments: Vec<AssignmentLine>,
    pub footer: Footer,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantPrefs {
    pub name: String,
    /// Topic names, best first.
    pub ranked: Vec<String>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentLine {
    pub name: String,
    pub topic: String,
    pub rank: Option<u32>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    pub total_weight: u64,
    pub first_choice: usize,
    pub unranked: usize,
    pub seed: u64,
    pub similarity: f64,
    pub input_sha256: String,
}

// ===== API =====

/// Map a finished run into the report model.
pub fn build_model(store: &PreferenceStore, result: &ResultDoc) -> Result<ReportModel, ReportError> {
    if result.topics.len() != store.topic_count() {
        return Err(ReportError::TopicMismatch {
            result: result.topics.len(),
            store: store.topic_count(),
        });
    }

    let preferences = store
        .participants()
        .map(|(name, ranking)| ParticipantPrefs {
            name: name.to_string(),
            ranked: ranking
                .iter()
                .filter_map(|t| store.topic_name(t).map(str::to_string))
                .collect(),
        })
        .collect();

    let mut assignments = Vec::with_capacity(result.assignments.len());
    for row in &result.assignments {
        if !store.contains_participant(&row.name) {
            return Err(ReportError::UnknownParticipant(row.name.clone()));
        }
        assignments.push(AssignmentLine {
            name: row.name.clone(),
            topic: row.topic.clone(),
            rank: row.rank,
        });
    }

    let footer = Footer {
        total_weight: result.total_weight,
        first_choice: result.assignments.iter().filter(|a| a.rank == Some(1)).count(),
        unranked: result.assignments.iter().filter(|a| a.rank.is_none()).count(),
        seed: result.seed,
        similarity: result.similarity.value(),
        input_sha256: result.input_sha256.clone(),
    };

    Ok(ReportModel {
        topics: result.topics.clone(),
        preferences,
        assignments,
        footer,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use ta_core::{PreferenceStore, Ranking, SimilarityThreshold, TopicId};
    use ta_pipeline::{AssignmentRow, ResultDoc};

    pub fn store_and_result() -> (PreferenceStore, ResultDoc) {
        let mut s = PreferenceStore::new(vec!["Compilers".into(), "Networks".into(), "Databases".into()])
            .unwrap();
        s.insert_participant(
            "ada@uni.edu".into(),
            Ranking::try_from_vec(vec![TopicId::new(0), TopicId::new(1)]).unwrap(),
        )
        .unwrap();
        s.insert_participant("bob".into(), Ranking::new()).unwrap();
        let r = ResultDoc {
            input_sha256: "ab".repeat(32),
            seed: 9,
            similarity: SimilarityThreshold::default(),
            topics: s.topics().to_vec(),
            assignments: vec![
                AssignmentRow {
                    name: "ada@uni.edu".into(),
                    topic: "Compilers".into(),
                    rank: Some(1),
                },
                AssignmentRow {
                    name: "bob".into(),
                    topic: "Databases".into(),
                    rank: None,
                },
            ],
            total_weight: 3,
        };
        (s, r)
    }
}
