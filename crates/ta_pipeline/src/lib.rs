//! ta_pipeline: deterministic run surface (load → validate → weigh → solve → build result).
//! File access, JSON and hashing go through `ta_io`; math goes through `ta_algo`.
//! Given the same input bytes, threshold and seed, a run produces the same
//! `ResultDoc`.

#![forbid(unsafe_code)]

pub mod load;
pub mod validate;
pub mod build_result;

use std::path::Path;

use thiserror::Error;

use ta_algo::{solve_store, Assignment, SolveError};
use ta_core::{CoreError, Params, PreferenceStore, ShuffleRng, SimilarityThreshold};
use ta_io::text::Notice;
use ta_io::IoError;

pub use build_result::{build_result, AssignmentRow, ResultDoc};
pub use load::{InputSource, Loaded};
pub use validate::{validate, Severity, ValidationIssue, ValidationReport};

/// Single error surface for a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unreadable, oversized or non-UTF-8 input, or an unwritable output.
    #[error("{0}")]
    Io(String),
    /// Malformed preferences (unknown topic, duplicate participant, …).
    #[error("{0}")]
    Input(String),
    /// Invalid run configuration.
    #[error("configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("build: {0}")]
    Build(String),
}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Ingest(_) | IoError::Tabular(_) => PipelineError::Input(e.to_string()),
            IoError::Path(_) | IoError::Limit(_) | IoError::Encoding(_) => {
                PipelineError::Io(e.to_string())
            }
            IoError::Json(m) | IoError::Hash(m) => PipelineError::Build(m),
        }
    }
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Config(e.to_string())
    }
}

/// Everything a run needs. The seed is already resolved.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub source: InputSource,
    pub similarity: SimilarityThreshold,
    pub seed: u64,
}

impl PipelineCtx {
    /// Build from `Params`, calling `fresh_seed` only when no seed is configured.
    pub fn from_params(source: InputSource, params: &Params, fresh_seed: impl FnOnce() -> u64) -> Self {
        Self {
            source,
            similarity: params.similarity,
            seed: params.seed.unwrap_or_else(fresh_seed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub store: PreferenceStore,
    pub notices: Vec<Notice>,
    pub validation: ValidationReport,
    pub assignment: Assignment,
    pub result: ResultDoc,
}

/// Run from a loaded context.
pub fn run_with_ctx(ctx: &PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let mut rng = ShuffleRng::from_seed_u64(ctx.seed);

    // --- LOAD ---
    let Loaded {
        store,
        notices,
        input_sha256,
    } = load::load(&ctx.source, ctx.similarity, &mut rng)?;

    // --- VALIDATE ---
    let validation = validate(&store);
    for issue in &validation.issues {
        if issue.severity == Severity::Warning {
            tracing::warn!(code = issue.code, "{}", issue.message);
        }
    }
    // Capacity is the only blocking check.
    if !validation.pass {
        return Err(PipelineError::Solve(SolveError::Infeasible {
            participants: store.participant_count(),
            topics: store.topic_count(),
        }));
    }

    // --- WEIGH + SOLVE ---
    let assignment = solve_store(&store, &mut rng)?;
    tracing::info!(
        seed = ctx.seed,
        participants = assignment.len(),
        total_weight = assignment.total_weight,
        "assignment solved"
    );

    // --- BUILD_RESULT ---
    let result = build_result(&store, &assignment, ctx.seed, ctx.similarity, input_sha256)?;

    Ok(PipelineOutputs {
        store,
        notices,
        validation,
        assignment,
        result,
    })
}

/// Convenience: run a preference file with explicit knobs.
pub fn run_file(
    path: &Path,
    format: ta_io::loader::InputFormat,
    similarity: SimilarityThreshold,
    seed: u64,
) -> Result<PipelineOutputs, PipelineError> {
    run_with_ctx(&PipelineCtx {
        source: InputSource::File {
            path: path.to_path_buf(),
            format,
        },
        similarity,
        seed,
    })
}

/// Write `result` as canonical JSON, atomically.
pub fn write_result(path: &Path, result: &ResultDoc) -> Result<(), PipelineError> {
    ta_io::canonical_json::write_canonical_file(path, result).map_err(|e| match e {
        IoError::Json(m) => PipelineError::Build(m),
        other => PipelineError::Io(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use ta_io::loader::InputFormat;

    const PREFS: &str = "Compilers\nNetworks\nDatabases\n\nada@uni.edu\nCompilers\nNetworks\n\ngrace@uni.edu\nCompilers\nDatabases\n";

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn end_to_end_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "prefs.txt", PREFS);
        let out = run_file(&p, InputFormat::Auto, SimilarityThreshold::default(), 42).unwrap();

        // Best total: one gets Compilers (3) and the other a second choice (2).
        assert_eq!(out.result.total_weight, 5);
        assert_eq!(out.result.assignments.len(), 2);
        assert_eq!(out.result.seed, 42);
        assert_eq!(out.result.ranked_count(), 2);
        let names: Vec<&str> = out.result.assignments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["ada@uni.edu", "grace@uni.edu"]);
        assert!(out.validation.pass);
    }

    #[test]
    fn same_seed_same_result() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "prefs.txt", PREFS);
        let a = run_file(&p, InputFormat::Text, SimilarityThreshold::default(), 7).unwrap();
        let b = run_file(&p, InputFormat::Text, SimilarityThreshold::default(), 7).unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn infeasible_is_solve_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "prefs.txt", "A\n\nx@y.io\nA\n\nz@y.io\nA\n");
        let err = run_file(&p, InputFormat::Text, SimilarityThreshold::default(), 1).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Solve(SolveError::Infeasible { participants: 2, topics: 1 })
        ));
    }

    #[test]
    fn input_errors_are_classified() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "prefs.txt", "A\nB\n\nx@y.io\nQuantum\n");
        let err = run_file(&p, InputFormat::Text, SimilarityThreshold::default(), 1).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
        let err = run_file(&dir.path().join("missing.txt"), InputFormat::Text, SimilarityThreshold::default(), 1)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn params_seed_wins_over_fresh() {
        let params = Params {
            seed: Some(5),
            ..Params::default()
        };
        let src = InputSource::Synthetic { topics: 3, participants: 2 };
        let ctx = PipelineCtx::from_params(src.clone(), &params, || unreachable!());
        assert_eq!(ctx.seed, 5);
        let ctx = PipelineCtx::from_params(src, &Params::default(), || 99);
        assert_eq!(ctx.seed, 99);
    }

    #[test]
    fn synthetic_run_and_written_result() {
        let ctx = PipelineCtx {
            source: InputSource::Synthetic { topics: 8, participants: 5 },
            similarity: SimilarityThreshold::default(),
            seed: 2024,
        };
        let out = run_with_ctx(&ctx).unwrap();
        assert_eq!(out.result.topics.len(), 8);
        assert_eq!(out.result.assignments.len(), 5);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_result(&path, &out.result).unwrap();
        let back: ResultDoc = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, out.result);
    }
}
