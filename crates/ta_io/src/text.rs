//! Line-oriented preference format.
//!
//! ```text
//! <topic>            one or more
//! <blank>            ends the topic list
//! <participant>      e.g. an email address
//! <preference>       best choice first, matched fuzzily against the topics
//! <blank>            ends this participant's block
//! ...
//! ```
//!
//! Parsing is a three-state machine (`Topics → Username → Prefs → Username …`).
//! Each state owns its working data, so nothing leaks between runs or between
//! participants. Line numbers in errors and notices are 1-based.

use std::fmt;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

use ta_algo::{resolve, Resolution, UnresolvedReason};
use ta_core::{CoreError, PreferenceStore, Ranking, SimilarityThreshold, TopicId};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").expect("invalid EMAIL_RE")
});

/// True if `s` has the shape of an email address.
pub fn looks_like_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/* ----------------------------------- Errors ----------------------------------- */

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    #[error("no topics found before the first blank line")]
    NoTopics,

    #[error("line {line}: topic \"{name}\" appears multiple times in the topic list")]
    DuplicateTopic { line: usize, name: String },

    #[error("line {line}: username \"{name}\" appears multiple times in the preference list")]
    DuplicateParticipant { line: usize, name: String },

    #[error("line {line}: user preference \"{token}\" does not appear in the topics list ({reason})")]
    UnresolvedPreference {
        line: usize,
        token: String,
        reason: String,
    },

    #[error("line {line}: user preference \"{token}\" repeats topic \"{topic}\"")]
    RepeatedPreference {
        line: usize,
        token: String,
        topic: String,
    },

    #[error("preference store invariant: {0}")]
    Store(#[from] CoreError),
}

impl IngestError {
    /// Source line, where one applies.
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::DuplicateTopic { line, .. }
            | IngestError::DuplicateParticipant { line, .. }
            | IngestError::UnresolvedPreference { line, .. }
            | IngestError::RepeatedPreference { line, .. } => Some(*line),
            IngestError::NoTopics | IngestError::Store(_) => None,
        }
    }
}

/* ----------------------------------- Notices ---------------------------------- */

/// Non-fatal diagnostics collected while parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub line: usize,
    pub kind: NoticeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeKind {
    /// Participant name is not email-shaped.
    NotAnEmail { name: String },
    /// A preference was fuzzy-matched onto a topic.
    Corrected {
        token: String,
        topic: TopicId,
        topic_name: String,
        score: f64,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NoticeKind::NotAnEmail { name } => write!(
                f,
                "WARNING(Line {}): Username \"{}\" does not look like an email",
                self.line, name
            ),
            NoticeKind::Corrected { token, topic_name, .. } => write!(
                f,
                "WARN(Line {}): Corrected user preference \"{}\" to topic \"{}\"",
                self.line, token, topic_name
            ),
        }
    }
}

/// Record a notice and log it once, at the moment it is found.
fn emit(notices: &mut Vec<Notice>, notice: Notice) {
    tracing::warn!("{notice}");
    notices.push(notice);
}

/// Parsed store plus the diagnostics produced along the way.
#[derive(Clone, Debug)]
pub struct Ingested {
    pub store: PreferenceStore,
    pub notices: Vec<Notice>,
}

/* -------------------------------- State machine -------------------------------- */

enum ParseState {
    /// Collecting topic names with their source lines.
    Topics { topics: Vec<(usize, String)> },
    /// Between participant blocks.
    Username { store: PreferenceStore },
    /// Inside a participant block.
    Prefs {
        store: PreferenceStore,
        name: String,
        ranking: Ranking,
    },
}

/// Parse the line-oriented format, resolving preferences against the topic
/// list with `threshold`.
pub fn parse_text(input: &str, threshold: SimilarityThreshold) -> Result<Ingested, IngestError> {
    let mut notices = Vec::new();
    let mut state = ParseState::Topics { topics: Vec::new() };

    for (i, raw) in input.lines().enumerate() {
        state = step(state, i + 1, raw.trim(), threshold, &mut notices)?;
    }

    let store = match state {
        ParseState::Topics { topics } => finalize_topics(topics)?,
        ParseState::Username { store } => store,
        ParseState::Prefs {
            mut store,
            name,
            ranking,
        } => {
            store.insert_participant(name, ranking)?;
            store
        }
    };

    Ok(Ingested { store, notices })
}

fn step(
    state: ParseState,
    line: usize,
    text: &str,
    threshold: SimilarityThreshold,
    notices: &mut Vec<Notice>,
) -> Result<ParseState, IngestError> {
    let blank = text.is_empty();
    Ok(match state {
        // Leading blank lines are skipped; the first blank after a topic ends the list.
        ParseState::Topics { topics } if blank && topics.is_empty() => {
            ParseState::Topics { topics }
        }
        ParseState::Topics { topics } if blank => ParseState::Username {
            store: finalize_topics(topics)?,
        },
        ParseState::Topics { mut topics } => {
            topics.push((line, text.to_string()));
            ParseState::Topics { topics }
        }

        ParseState::Username { store } if blank => ParseState::Username { store },
        ParseState::Username { store } => {
            if !looks_like_email(text) {
                emit(
                    notices,
                    Notice {
                        line,
                        kind: NoticeKind::NotAnEmail {
                            name: text.to_string(),
                        },
                    },
                );
            }
            if store.contains_participant(text) {
                return Err(IngestError::DuplicateParticipant {
                    line,
                    name: text.to_string(),
                });
            }
            ParseState::Prefs {
                store,
                name: text.to_string(),
                ranking: Ranking::new(),
            }
        }

        ParseState::Prefs {
            mut store,
            name,
            ranking,
        } if blank => {
            store.insert_participant(name, ranking)?;
            ParseState::Username { store }
        }
        ParseState::Prefs {
            store,
            name,
            mut ranking,
        } => {
            let topic = resolve_line(&store, line, text, threshold, notices)?;
            if ranking.push(topic).is_err() {
                return Err(IngestError::RepeatedPreference {
                    line,
                    token: text.to_string(),
                    topic: store.topic_name(topic).unwrap_or_default().to_string(),
                });
            }
            ParseState::Prefs {
                store,
                name,
                ranking,
            }
        }
    })
}

fn finalize_topics(topics: Vec<(usize, String)>) -> Result<PreferenceStore, IngestError> {
    if topics.is_empty() {
        return Err(IngestError::NoTopics);
    }
    for (i, (line, name)) in topics.iter().enumerate() {
        if topics[..i].iter().any(|(_, n)| n == name) {
            return Err(IngestError::DuplicateTopic {
                line: *line,
                name: name.clone(),
            });
        }
    }
    Ok(PreferenceStore::new(topics.into_iter().map(|(_, n)| n).collect())?)
}

fn resolve_line(
    store: &PreferenceStore,
    line: usize,
    token: &str,
    threshold: SimilarityThreshold,
    notices: &mut Vec<Notice>,
) -> Result<TopicId, IngestError> {
    match resolve(token, store.topics(), threshold) {
        Resolution::Exact(topic) => Ok(topic),
        Resolution::Corrected { topic, score } => {
            emit(
                notices,
                Notice {
                    line,
                    kind: NoticeKind::Corrected {
                        token: token.to_string(),
                        topic,
                        topic_name: store.topic_name(topic).unwrap_or_default().to_string(),
                        score,
                    },
                },
            );
            Ok(topic)
        }
        Resolution::Unresolved(reason) => Err(IngestError::UnresolvedPreference {
            line,
            token: token.to_string(),
            reason: describe(store, reason),
        }),
    }
}

fn describe(store: &PreferenceStore, reason: UnresolvedReason) -> String {
    let name = |t: TopicId| store.topic_name(t).unwrap_or_default();
    match reason {
        UnresolvedReason::NoTopics => "topic list is empty".to_string(),
        UnresolvedReason::BelowThreshold { best } => format!(
            "closest is \"{}\" at {:.3}",
            name(best.topic),
            best.score
        ),
        UnresolvedReason::Ambiguous { best, runner_up } => format!(
            "ambiguous between \"{}\" ({:.3}) and \"{}\" ({:.3})",
            name(best.topic),
            best.score,
            name(runner_up.topic),
            runner_up.score
        ),
    }
}
