//! crates/ta_core/src/entities.rs
//! In-memory preference model: the ordered topic list and each participant's
//! ranking. Every instance owns its own containers; all mutation goes through
//! checked methods so the store invariants hold at every point:
//!
//! - topic names are non-empty and unique;
//! - every `TopicId` referenced by a ranking is `< topic_count()`;
//! - a ranking never repeats a topic;
//! - participant names are unique.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::TopicId;

/// A participant's ordered preferences, best choice first, no repeats.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ranking(Vec<TopicId>);

impl Ranking {
    #[inline]
    pub fn new() -> Self {
        Ranking(Vec::new())
    }

    /// Build from a list, rejecting repeats.
    pub fn try_from_vec(topics: Vec<TopicId>) -> Result<Self, CoreError> {
        let mut r = Ranking(Vec::with_capacity(topics.len()));
        for t in topics {
            r.push(t)?;
        }
        Ok(r)
    }

    /// Append the next-best choice.
    pub fn push(&mut self, topic: TopicId) -> Result<(), CoreError> {
        if self.0.contains(&topic) {
            return Err(CoreError::RepeatedTopic(topic));
        }
        self.0.push(topic);
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[TopicId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, topic: TopicId) -> bool {
        self.0.contains(&topic)
    }

    /// 0-based rank of `topic`, if ranked at all.
    #[inline]
    pub fn rank_of(&self, topic: TopicId) -> Option<usize> {
        self.0.iter().position(|&t| t == topic)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.0.iter().copied()
    }
}

/// Topics plus participant rankings, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferenceStore {
    topics: Vec<String>,
    users: Vec<(String, Ranking)>,
    by_name: BTreeMap<String, usize>,
}

impl PreferenceStore {
    /// Finalize the topic list. Names are taken as given (callers trim).
    pub fn new(topics: Vec<String>) -> Result<Self, CoreError> {
        TopicId::from_index(topics.len())?;
        for (i, name) in topics.iter().enumerate() {
            if name.is_empty() {
                return Err(CoreError::EmptyTopicName);
            }
            if topics[..i].contains(name) {
                return Err(CoreError::DuplicateTopic(name.clone()));
            }
        }
        Ok(Self {
            topics,
            users: Vec::new(),
            by_name: BTreeMap::new(),
        })
    }

    #[inline]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[inline]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    #[inline]
    pub fn topic_name(&self, id: TopicId) -> Option<&str> {
        self.topics.get(id.index()).map(String::as_str)
    }

    /// Position of an exactly-named topic.
    pub fn find_topic(&self, name: &str) -> Option<TopicId> {
        self.topics
            .iter()
            .position(|t| t == name)
            .map(|i| TopicId::new(i as u32))
    }

    #[inline]
    pub fn contains_participant(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Commit a participant's ranking.
    pub fn insert_participant(&mut self, name: String, ranking: Ranking) -> Result<(), CoreError> {
        if self.by_name.contains_key(&name) {
            return Err(CoreError::DuplicateParticipant(name));
        }
        if let Some(bad) = ranking.iter().find(|t| t.index() >= self.topics.len()) {
            return Err(CoreError::UnknownTopic(bad));
        }
        self.by_name.insert(name.clone(), self.users.len());
        self.users.push((name, ranking));
        Ok(())
    }

    #[inline]
    pub fn participant_count(&self) -> usize {
        self.users.len()
    }

    /// Participants in insertion order.
    pub fn participants(&self) -> impl Iterator<Item = (&str, &Ranking)> + '_ {
        self.users.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn ranking(&self, name: &str) -> Option<&Ranking> {
        self.by_name.get(name).map(|&i| &self.users[i].1)
    }
}
