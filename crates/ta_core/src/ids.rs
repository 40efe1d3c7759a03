//! crates/ta_core/src/ids.rs
//! Topic identifiers. A topic is known only by its position in the ordered
//! topic list, so the id is a thin index newtype.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Index of a topic in `PreferenceStore::topics()` (0-based).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TopicId(u32);

impl TopicId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TopicId(raw)
    }

    /// Checked conversion from a list position.
    #[inline]
    pub fn from_index(i: usize) -> Result<Self, CoreError> {
        u32::try_from(i).map(TopicId).map_err(|_| CoreError::TooManyTopics(i))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TopicId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        let id = TopicId::from_index(7).unwrap();
        assert_eq!(id.index(), 7);
        assert_eq!(id, TopicId::new(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn ordering_follows_index() {
        assert!(TopicId::new(1) < TopicId::new(2));
    }
}
