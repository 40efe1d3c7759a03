//! variables.rs
//! Run configuration: the similarity threshold domain and `Params` with safe defaults.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de::Error as DeError, de::Unexpected, Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Lowest accepted similarity threshold.
pub const SIMILARITY_MIN: f64 = 0.7;
/// Highest accepted similarity threshold (exact matches only).
pub const SIMILARITY_MAX: f64 = 1.0;
/// Default threshold for fuzzy preference matching.
pub const SIMILARITY_DEFAULT: f64 = 0.95;

/// ------------ Newtypes with invariants (validated on construction / de) ------------

/// Similarity score a fuzzy match must reach, in `[0.7, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimilarityThreshold(f64);

impl SimilarityThreshold {
    pub fn new(v: f64) -> Result<Self, CoreError> {
        // NaN fails both comparisons.
        if (SIMILARITY_MIN..=SIMILARITY_MAX).contains(&v) {
            Ok(Self(v))
        } else {
            Err(CoreError::DomainOutOfRange("similarity must be between 0.7 and 1.0"))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self(SIMILARITY_DEFAULT)
    }
}

impl fmt::Display for SimilarityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SimilarityThreshold {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: f64 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::DomainOutOfRange("similarity must be a number"))?;
        Self::new(v)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SimilarityThreshold {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(d)?;
        SimilarityThreshold::new(v)
            .map_err(|_| D::Error::invalid_value(Unexpected::Float(v), &"0.7..=1.0"))
    }
}

/// ------------ Params ------------

/// Per-run knobs. `seed` drives the fairness shuffle; `None` means the caller
/// picks one (the CLI draws from OS entropy and logs it).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Params {
    pub similarity: SimilarityThreshold,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub seed: Option<u64>,
}

impl Params {
    /// Validate a raw threshold and build params around it.
    pub fn with_similarity(v: f64) -> Result<Self, CoreError> {
        Ok(Self {
            similarity: SimilarityThreshold::new(v)?,
            seed: None,
        })
    }
}
