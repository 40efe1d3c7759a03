//! ta_core: Core types, store invariants, configuration domains, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`ta_algo`, `ta_io`, `ta_pipeline`, `ta_report`, `ta_cli`).
//!
//! - Topic ids: `TopicId` (index into the ordered topic list)
//! - Preference model: `Ranking`, `PreferenceStore`
//! - Configuration domains: `SimilarityThreshold`, `Params`
//! - Seedable RNG (ChaCha20) for the fairness shuffle and synthetic instances
//!
//! Serialization derives are gated behind `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use alloc::string::String;
    use core::fmt;

    use crate::ids::TopicId;

    /// Error set for core-domain validation. Every mutation of a
    /// `PreferenceStore` or `Ranking` that would break an invariant ends here.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum CoreError {
        EmptyTopicName,
        DuplicateTopic(String),
        TooManyTopics(usize),
        DuplicateParticipant(String),
        UnknownTopic(TopicId),
        RepeatedTopic(TopicId),
        DomainOutOfRange(&'static str),
        EmptyChoiceSet,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyTopicName => write!(f, "topic name is empty"),
                CoreError::DuplicateTopic(name) => write!(f, "duplicate topic \"{name}\""),
                CoreError::TooManyTopics(n) => write!(f, "too many topics: {n}"),
                CoreError::DuplicateParticipant(name) => {
                    write!(f, "participant \"{name}\" appears more than once")
                }
                CoreError::UnknownTopic(id) => write!(f, "unknown topic index {id}"),
                CoreError::RepeatedTopic(id) => write!(f, "topic index {id} ranked twice"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::EmptyChoiceSet => write!(f, "empty choice set"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod ids;
pub mod entities;
pub mod variables;
pub mod rng;
pub mod synthetic;

pub use entities::{PreferenceStore, Ranking};
pub use errors::CoreError;
pub use ids::TopicId;
pub use rng::ShuffleRng;
pub use variables::{Params, SimilarityThreshold};
