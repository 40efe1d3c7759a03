//! Synthetic instances for demos and tests.
//!
//! Topics are named `"1"..="T"`, participants `"A"`, `"B"`, … (at most 26), and
//! each participant ranks `min(3, T)` distinct random topics.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::entities::{PreferenceStore, Ranking};
use crate::errors::CoreError;
use crate::ids::TopicId;
use crate::rng::ShuffleRng;

pub const MAX_SYNTHETIC_PARTICIPANTS: usize = 26;
pub const SYNTHETIC_PREFS_PER_PARTICIPANT: usize = 3;

/// Generate a random store with `topics` topics and `participants` participants.
pub fn random_store(
    topics: usize,
    participants: usize,
    rng: &mut ShuffleRng,
) -> Result<PreferenceStore, CoreError> {
    if participants > MAX_SYNTHETIC_PARTICIPANTS {
        return Err(CoreError::DomainOutOfRange("at most 26 synthetic participants"));
    }
    if topics < participants {
        return Err(CoreError::DomainOutOfRange("synthetic topics must be >= participants"));
    }

    let names: Vec<String> = (1..=topics).map(|i| i.to_string()).collect();
    let mut store = PreferenceStore::new(names)?;

    let per = SYNTHETIC_PREFS_PER_PARTICIPANT.min(topics);
    for p in 0..participants {
        let name = char::from(b'A' + p as u8).to_string();
        let picks = rng.sample_distinct(topics, per).ok_or(CoreError::EmptyChoiceSet)?;
        let mut ranking = Ranking::new();
        for t in picks {
            ranking.push(TopicId::from_index(t)?)?;
        }
        store.insert_participant(name, ranking)?;
    }
    Ok(store)
}
