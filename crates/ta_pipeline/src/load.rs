//! crates/ta_pipeline/src/load.rs
//! LOAD stage: turn an `InputSource` into a store, its notices, and a digest.

use std::path::PathBuf;

use serde::Serialize;

use ta_core::{synthetic, PreferenceStore, ShuffleRng, SimilarityThreshold};
use ta_io::loader::{load_preferences, InputFormat};
use ta_io::text::Notice;

use crate::PipelineError;

/// Where preferences come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    File { path: PathBuf, format: InputFormat },
    /// Generated instance with `topics` topics and `participants` participants.
    Synthetic { topics: usize, participants: usize },
}

#[derive(Clone, Debug)]
pub struct Loaded {
    pub store: PreferenceStore,
    pub notices: Vec<Notice>,
    pub input_sha256: String,
}

/// Canonical shape of a store, used to digest generated instances.
#[derive(Serialize)]
struct StoreView<'a> {
    topics: &'a [String],
    participants: Vec<ParticipantView<'a>>,
}

#[derive(Serialize)]
struct ParticipantView<'a> {
    name: &'a str,
    ranking: Vec<&'a str>,
}

pub(crate) fn store_digest(store: &PreferenceStore) -> Result<String, PipelineError> {
    let view = StoreView {
        topics: store.topics(),
        participants: store
            .participants()
            .map(|(name, ranking)| ParticipantView {
                name,
                ranking: ranking
                    .iter()
                    .filter_map(|t| store.topic_name(t))
                    .collect(),
            })
            .collect(),
    };
    Ok(ta_io::hasher::sha256_canonical(&view)?)
}

/// Load preferences. Synthetic generation draws from `rng`, so the same seed
/// yields the same instance and the same shuffle.
pub fn load(
    source: &InputSource,
    similarity: SimilarityThreshold,
    rng: &mut ShuffleRng,
) -> Result<Loaded, PipelineError> {
    match source {
        InputSource::File { path, format } => {
            let l = load_preferences(path, *format, similarity)?;
            Ok(Loaded {
                store: l.store,
                notices: l.notices,
                input_sha256: l.input_sha256,
            })
        }
        InputSource::Synthetic {
            topics,
            participants,
        } => {
            let store = synthetic::random_store(*topics, *participants, rng)
                .map_err(|e| PipelineError::Config(e.to_string()))?;
            tracing::info!(topics, participants, "generated synthetic instance");
            let input_sha256 = store_digest(&store)?;
            Ok(Loaded {
                store,
                notices: Vec::new(),
                input_sha256,
            })
        }
    }
}
