// crates/ta_cli/src/main.rs
//
// `assign`: parse args → init logging → resolve seed → pipeline → print report → write result.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags or configuration.
    pub const USAGE: i32 = 2;
    /// Preference file rejected (unknown topic, duplicate participant, …).
    pub const INPUT: i32 = 3;
    pub const IO: i32 = 4;
    /// No complete assignment exists, or the solver could not certify one.
    pub const SOLVE: i32 = 5;
}

use std::process::ExitCode;

use rand_core::{OsRng, RngCore};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, ReportKind};
use ta_core::Params;
use ta_pipeline::{run_with_ctx, write_result, InputSource, PipelineCtx, PipelineError, PipelineOutputs};
use ta_report::build_model;

#[derive(Debug)]
enum MainError {
    Usage(String),
    Input(String),
    Io(String),
    Solve(String),
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Usage(m)
            | MainError::Input(m)
            | MainError::Io(m)
            | MainError::Solve(m)
            | MainError::Render(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("assign: error: {e}");
            return ExitCode::from(exitcodes::USAGE as u8);
        }
    };
    init_logging(args.quiet);

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("assign: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let source = match (&args.random, &args.input) {
        (Some(spec), _) => InputSource::Synthetic {
            topics: spec.topics,
            participants: spec.participants,
        },
        (None, Some(path)) => InputSource::File {
            path: path.clone(),
            format: args.format,
        },
        (None, None) => return Err(MainError::Usage("an INPUT file or --random is required".into())),
    };

    let params = Params {
        similarity: args.similarity,
        seed: args.seed,
    };
    let ctx = PipelineCtx::from_params(source, &params, || {
        let seed = OsRng.next_u64();
        tracing::info!(seed, "no --seed given; drew one from OS entropy");
        seed
    });

    // Notices and validation warnings were already logged as they were found.
    let out = run_with_ctx(&ctx).map_err(map_pipeline_err)?;

    if !args.quiet {
        print_report(args.report, &out)?;
    }

    if let Some(path) = &args.out {
        write_result(path, &out.result).map_err(map_pipeline_err)?;
        tracing::info!(path = %path.display(), "result written");
    }
    Ok(())
}

fn print_report(kind: ReportKind, out: &PipelineOutputs) -> Result<(), MainError> {
    let model = build_model(&out.store, &out.result).map_err(|e| MainError::Render(e.to_string()))?;
    match kind {
        ReportKind::Text => print!("{}", ta_report::render_text(&model)),
        ReportKind::Json => {
            #[cfg(feature = "report-json")]
            {
                let s = ta_report::render_json(&model).map_err(|e| MainError::Render(e.to_string()))?;
                println!("{s}");
            }
            #[cfg(not(feature = "report-json"))]
            {
                return Err(MainError::Usage("built without JSON reporting".into()));
            }
        }
    }
    Ok(())
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Usage(_) => USAGE,
        MainError::Input(_) => INPUT,
        MainError::Io(_) | MainError::Render(_) => IO,
        MainError::Solve(_) => SOLVE,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Config(m) => MainError::Usage(m),
        PipelineError::Input(m) => MainError::Input(m),
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Solve(s) => MainError::Solve(s.to_string()),
        PipelineError::Build(m) => MainError::Io(m),
    }
}
