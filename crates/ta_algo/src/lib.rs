// crates/ta_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Algorithm layer. Pure functions over `ta_core` types; no I/O.
//!
//! - `similarity`: string likeness in `[0, 1]` (Jaro–Winkler)
//! - `resolve`: free-text preference token → topic, with accept/reject/ambiguous policy
//! - `weights`: ordinal rank → cardinal weight
//! - `assignment`: padded cost matrix + Hungarian method, globally optimal 1:1 matching

pub mod similarity;
pub mod resolve;
pub mod weights;
pub mod assignment;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use similarity::{jaro_winkler, JaroWinkler, Similarity};
pub use resolve::{resolve, resolve_with, Resolution, UnresolvedReason, AMBIGUITY_MARGIN};
pub use weights::{ranks_to_weights, WeightMap};
pub use assignment::{
    solve, solve_store, AssignedTopic, Assignment, CostMatrix, SolveError,
};
