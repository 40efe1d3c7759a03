// crates/ta_cli/src/args.rs
//
// Argument surface for `assign`.
// - INPUT is a local preference file; `--random T:P` replaces it with a generated instance
// - Seed accepts decimal u64 or 0x-hex (up to 16 nybbles)
// - Similarity is validated by clap, so a bad value is a usage error

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use ta_core::synthetic::MAX_SYNTHETIC_PARTICIPANTS;
use ta_core::SimilarityThreshold;
use ta_io::loader::InputFormat;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "assign",
    version,
    disable_help_subcommand = true,
    about = "Assign participants to topics, maximizing total preference weight"
)]
pub struct Args {
    /// Preference file: topics, a blank line, then participant blocks (or .csv/.tsv rows).
    #[arg(required_unless_present = "random")]
    pub input: Option<PathBuf>,

    /// Fuzzy-match threshold for preference tokens, between 0.7 and 1.0 (1.0 is strictest).
    #[arg(long, default_value = "0.95", value_parser = parse_similarity)]
    pub similarity: SimilarityThreshold,

    /// Shuffle seed. Accepts decimal u64 or 0x-hex (≤16 hex digits). Random if omitted.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Input format; `auto` treats .csv/.tsv/.tab as tabular.
    #[arg(long, default_value = "auto", value_parser = parse_format)]
    pub format: InputFormat,

    /// Generate a random instance TOPICS:PARTICIPANTS instead of reading INPUT.
    #[arg(long, value_name = "TOPICS:PARTICIPANTS", value_parser = parse_random, conflicts_with = "input")]
    pub random: Option<RandomSpec>,

    /// Write the result as canonical JSON to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Report printed on stdout.
    #[arg(long, value_enum, default_value_t = ReportKind::Text)]
    pub report: ReportKind,

    /// Do not print the report; only warnings and errors reach stderr.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSpec {
    pub topics: usize,
    pub participants: usize,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

pub fn parse_similarity(s: &str) -> Result<SimilarityThreshold, String> {
    s.parse::<SimilarityThreshold>().map_err(|e| e.to_string())
}

pub fn parse_format(s: &str) -> Result<InputFormat, String> {
    s.parse()
}

pub fn parse_random(s: &str) -> Result<RandomSpec, String> {
    let (t, p) = s
        .split_once(':')
        .ok_or_else(|| "expected TOPICS:PARTICIPANTS, e.g. 8:5".to_string())?;
    let topics: usize = t.trim().parse().map_err(|_| format!("bad topic count '{t}'"))?;
    let participants: usize = p
        .trim()
        .parse()
        .map_err(|_| format!("bad participant count '{p}'"))?;
    if participants > MAX_SYNTHETIC_PARTICIPANTS {
        return Err(format!("at most {MAX_SYNTHETIC_PARTICIPANTS} random participants"));
    }
    if participants > topics {
        return Err("random instances need at least as many topics as participants".into());
    }
    Ok(RandomSpec {
        topics,
        participants,
    })
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Parse argv and check paths. Clap handles usage errors itself (exit 2).
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    check(&args)?;
    Ok(args)
}

fn check(args: &Args) -> Result<(), CliError> {
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    if let Some(input) = &args.input {
        ensure_local_path(input)?;
        if !input.is_file() {
            return Err(CliError::NotFound(input.display().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parser_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42u64);
        assert_eq!(parse_seed("0x2A").unwrap(), 42u64);
        assert_eq!(parse_seed("0xffffffffffffffff").unwrap(), u64::MAX);
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0xFFFFFFFFFFFFFFFFF").is_err());
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn similarity_range() {
        assert!(parse_similarity("0.7").is_ok());
        assert!(parse_similarity("1.0").is_ok());
        assert!(parse_similarity("0.69").is_err());
        assert!(parse_similarity("1.01").is_err());
        assert!(parse_similarity("high").is_err());
    }

    #[test]
    fn random_spec() {
        assert_eq!(
            parse_random("8:5").unwrap(),
            RandomSpec {
                topics: 8,
                participants: 5
            }
        );
        assert!(parse_random("3:5").is_err());
        assert!(parse_random("40:27").is_err());
        assert!(parse_random("8").is_err());
    }

    #[test]
    fn clap_surface() {
        let a = Args::try_parse_from(["assign", "prefs.txt", "--seed", "0x10", "--format", "tabular"]).unwrap();
        assert_eq!(a.seed, Some(16));
        assert_eq!(a.format, InputFormat::Tabular);
        assert_eq!(a.similarity, SimilarityThreshold::default());
        assert_eq!(a.report, ReportKind::Text);

        assert!(Args::try_parse_from(["assign"]).is_err());
        assert!(Args::try_parse_from(["assign", "--random", "4:2"]).is_ok());
        assert!(Args::try_parse_from(["assign", "x.txt", "--random", "4:2"]).is_err());
        assert!(Args::try_parse_from(["assign", "x.txt", "--similarity", "0.5"]).is_err());
    }

    #[test]
    fn rejects_remote_paths() {
        assert!(ensure_local_path(Path::new("https://x/y.txt")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/prefs.txt")).is_ok());
    }
}
