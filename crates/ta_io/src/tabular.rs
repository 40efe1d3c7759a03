// crates/ta_io/src/tabular.rs
//! Delimited preference rows: `name, first choice, second choice, …`.
//!
//! The topic list is the set of distinct topic cells in first-appearance
//! order. Labels are matched exactly; no fuzzy correction happens here.

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use ta_core::{CoreError, PreferenceStore, Ranking};

use crate::text::looks_like_email;

const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];
const HEADER_WORDS: [&str; 5] = ["name", "email", "user", "student", "participant"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TabularError {
    #[error("empty tabular input")]
    Empty,
    #[error("row {row}: duplicate participant \"{name}\"")]
    DuplicateName { row: usize, name: String },
    #[error("row {row}: topic \"{topic}\" ranked more than once")]
    RepeatedTopic { row: usize, topic: String },
    #[error("malformed delimited input: {0}")]
    Csv(String),
    #[error("preference store invariant: {0}")]
    Store(#[from] CoreError),
}

impl From<csv::Error> for TabularError {
    fn from(e: csv::Error) -> Self {
        TabularError::Csv(e.to_string())
    }
}

/// Pick the most frequent candidate delimiter on `line` (`,` on ties or none).
pub fn sniff_delimiter(line: &str) -> char {
    let mut best = (',', 0usize);
    for d in CANDIDATE_DELIMITERS {
        let n = line.matches(d).count();
        if n > best.1 {
            best = (d, n);
        }
    }
    best.0
}

fn is_header(first: &StringRecord, second: Option<&StringRecord>) -> bool {
    let Some(head) = first.get(0) else { return false };
    if HEADER_WORDS.iter().any(|w| head.eq_ignore_ascii_case(w)) {
        return true;
    }
    match second.and_then(|r| r.get(0)) {
        Some(next) => !looks_like_email(head) && looks_like_email(next),
        None => false,
    }
}

/// Parse delimited rows into a store.
pub fn parse_tabular(input: &str) -> Result<PreferenceStore, TabularError> {
    let Some(first_line) = input.lines().find(|l| !l.trim().is_empty()) else {
        return Err(TabularError::Empty);
    };
    let delim = sniff_delimiter(first_line);

    let mut rdr = ReaderBuilder::new()
        .delimiter(delim as u8)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let mut records: Vec<(usize, StringRecord)> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let row = rec.position().map_or(records.len() + 1, |p| p.line() as usize);
        records.push((row, rec));
    }

    if !records.is_empty() && is_header(&records[0].1, records.get(1).map(|r| &r.1)) {
        records.remove(0);
    }

    // First pass: topic labels in first-appearance order.
    let mut topics: Vec<String> = Vec::new();
    for (_, cells) in &records {
        if cells.get(0).map_or(true, str::is_empty) {
            continue;
        }
        for cell in cells.iter().skip(1).filter(|c| !c.is_empty()) {
            if !topics.iter().any(|t| t == cell) {
                topics.push(cell.to_string());
            }
        }
    }
    if topics.is_empty() {
        return Err(TabularError::Empty);
    }

    let mut store = PreferenceStore::new(topics)?;
    for (row, cells) in records {
        let Some(name) = cells.get(0).filter(|c| !c.is_empty()) else {
            continue;
        };
        if store.contains_participant(name) {
            return Err(TabularError::DuplicateName {
                row,
                name: name.to_string(),
            });
        }
        let mut ranking = Ranking::new();
        for cell in cells.iter().skip(1).filter(|c| !c.is_empty()) {
            // Every non-empty cell was collected above.
            let Some(id) = store.find_topic(cell) else { continue };
            if ranking.push(id).is_err() {
                return Err(TabularError::RepeatedTopic {
                    row,
                    topic: cell.to_string(),
                });
            }
        }
        store.insert_participant(name.to_string(), ranking)?;
    }

    tracing::debug!(
        delimiter = %delim.escape_default(),
        topics = store.topic_count(),
        participants = store.participant_count(),
        "parsed tabular preferences"
    );
    Ok(store)
}
