//! Loader: read a local preference file with size and encoding limits, pick
//! the format, parse it, and return the store together with the digest of the
//! raw bytes. No network I/O.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use ta_core::{PreferenceStore, SimilarityThreshold};

use crate::tabular::parse_tabular;
use crate::text::{parse_text, Notice};
use crate::{IoError, IoResult};

/// Upper bound on input size.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

const TABULAR_EXTENSIONS: [&str; 3] = ["csv", "tsv", "tab"];

/// Requested input format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Decide from the file extension.
    #[default]
    Auto,
    Text,
    Tabular,
}

impl InputFormat {
    /// Resolve `Auto` against `path`.
    pub fn resolve_for(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase());
                match ext {
                    Some(e) if TABULAR_EXTENSIONS.contains(&e.as_str()) => InputFormat::Tabular,
                    _ => InputFormat::Text,
                }
            }
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Text => "text",
            InputFormat::Tabular => "tabular",
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "text" | "txt" => Ok(InputFormat::Text),
            "tabular" | "csv" => Ok(InputFormat::Tabular),
            other => Err(format!("unknown input format '{other}' (expected auto|text|tabular)")),
        }
    }
}

/// A parsed input file.
#[derive(Clone, Debug)]
pub struct LoadedInput {
    pub store: PreferenceStore,
    pub notices: Vec<Notice>,
    /// Lowercase hex SHA-256 of the raw file bytes.
    pub input_sha256: String,
    /// Format actually used (never `Auto`).
    pub format: InputFormat,
}

/// Read `path` whole, refusing files over `MAX_INPUT_BYTES`.
pub fn read_bounded(path: &Path) -> IoResult<Vec<u8>> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let meta = f.metadata()?;
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {} bytes (max {MAX_INPUT_BYTES})",
            path.display(),
            meta.len()
        )));
    }
    let mut buf = Vec::with_capacity(meta.len() as usize);
    // The metadata can be stale; cap the read as well.
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} exceeds {MAX_INPUT_BYTES} bytes",
            path.display()
        )));
    }
    Ok(buf)
}

/// Parse already-read text in the given (non-auto) format.
pub fn parse_str(
    text: &str,
    format: InputFormat,
    threshold: SimilarityThreshold,
) -> IoResult<(PreferenceStore, Vec<Notice>)> {
    match format {
        InputFormat::Tabular => Ok((parse_tabular(text)?, Vec::new())),
        InputFormat::Text | InputFormat::Auto => {
            let ingested = parse_text(text, threshold)?;
            Ok((ingested.store, ingested.notices))
        }
    }
}

/// Load and parse a preference file.
pub fn load_preferences(
    path: &Path,
    format: InputFormat,
    threshold: SimilarityThreshold,
) -> IoResult<LoadedInput> {
    let bytes = read_bounded(path)?;
    let input_sha256 = crate::try_sha256_hex(&bytes)?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|e| IoError::Encoding(format!("{}: {e}", path.display())))?;
    // A leading BOM would otherwise become part of the first topic name.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let format = format.resolve_for(path);
    let (store, notices) = parse_str(text, format, threshold)?;
    tracing::info!(
        path = %path.display(),
        format = format.as_str(),
        topics = store.topic_count(),
        participants = store.participant_count(),
        notices = notices.len(),
        "loaded preferences"
    );

    Ok(LoadedInput {
        store,
        notices,
        input_sha256,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn auto_format_by_extension() {
        let f = |p: &str| InputFormat::Auto.resolve_for(&PathBuf::from(p));
        assert_eq!(f("prefs.csv"), InputFormat::Tabular);
        assert_eq!(f("prefs.TSV"), InputFormat::Tabular);
        assert_eq!(f("prefs.tab"), InputFormat::Tabular);
        assert_eq!(f("prefs.txt"), InputFormat::Text);
        assert_eq!(f("prefs"), InputFormat::Text);
        assert_eq!(
            InputFormat::Text.resolve_for(&PathBuf::from("x.csv")),
            InputFormat::Text
        );
    }

    #[test]
    fn format_from_str() {
        assert_eq!("Tabular".parse::<InputFormat>(), Ok(InputFormat::Tabular));
        assert_eq!("auto".parse::<InputFormat>(), Ok(InputFormat::Auto));
        assert!("xml".parse::<InputFormat>().is_err());
    }

    #[test]
    fn missing_file_is_path_error() {
        let err = load_preferences(
            Path::new("/definitely/not/here.txt"),
            InputFormat::Auto,
            SimilarityThreshold::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::Path(_)));
    }
}
