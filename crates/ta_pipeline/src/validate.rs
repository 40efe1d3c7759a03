//! crates/ta_pipeline/src/validate.rs
//! Pre-solve checks on a loaded store. Pure and deterministic; issues are
//! sorted so reports are byte-identical across runs.

use ta_core::PreferenceStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Root,
    Participant(String),
    Topic(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

/// `pass` is true iff there is no `Error`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }
}

pub fn validate(store: &PreferenceStore) -> ValidationReport {
    let mut issues = Vec::new();
    issues.extend(check_capacity(store));
    issues.extend(check_empty_rankings(store));
    issues.extend(check_unranked_topics(store));

    issues.sort_by(|a, b| {
        (a.severity, a.code, &a.message).cmp(&(b.severity, b.code, &b.message))
    });

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

fn check_capacity(store: &PreferenceStore) -> Option<ValidationIssue> {
    let (p, t) = (store.participant_count(), store.topic_count());
    (p > t).then(|| ValidationIssue {
        severity: Severity::Error,
        code: "capacity",
        message: format!("{p} participants but only {t} topics"),
        where_: EntityRef::Root,
    })
}

fn check_empty_rankings(store: &PreferenceStore) -> Vec<ValidationIssue> {
    store
        .participants()
        .filter(|(_, r)| r.is_empty())
        .map(|(name, _)| ValidationIssue {
            severity: Severity::Warning,
            code: "no_preferences",
            message: format!("\"{name}\" ranked no topics and may receive any free topic"),
            where_: EntityRef::Participant(name.to_string()),
        })
        .collect()
}

fn check_unranked_topics(store: &PreferenceStore) -> Vec<ValidationIssue> {
    if store.participant_count() == 0 {
        return Vec::new();
    }
    store
        .topics()
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let id = ta_core::TopicId::new(*i as u32);
            !store.participants().any(|(_, r)| r.contains(id))
        })
        .map(|(_, name)| ValidationIssue {
            severity: Severity::Warning,
            code: "unranked_topic",
            message: format!("topic \"{name}\" is ranked by nobody"),
            where_: EntityRef::Topic(name.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::{Ranking, TopicId};

    fn store(topics: &[&str], users: &[(&str, &[u32])]) -> PreferenceStore {
        let mut s = PreferenceStore::new(topics.iter().map(|t| t.to_string()).collect()).unwrap();
        for (name, r) in users {
            let r = Ranking::try_from_vec(r.iter().copied().map(TopicId::new).collect()).unwrap();
            s.insert_participant(name.to_string(), r).unwrap();
        }
        s
    }

    #[test]
    fn capacity_is_an_error() {
        let s = store(&["A"], &[("x", &[0]), ("y", &[])]);
        let rep = validate(&s);
        assert!(!rep.pass);
        assert_eq!(rep.errors().count(), 1);
        assert_eq!(rep.issues[0].code, "capacity");
    }

    #[test]
    fn warnings_do_not_fail() {
        let s = store(&["A", "B", "C"], &[("x", &[0]), ("y", &[])]);
        let rep = validate(&s);
        assert!(rep.pass);
        let codes: Vec<&str> = rep.issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, ["no_preferences", "unranked_topic", "unranked_topic"]);
    }

    #[test]
    fn clean_store_has_no_issues() {
        let s = store(&["A", "B"], &[("x", &[0, 1]), ("y", &[1])]);
        assert_eq!(validate(&s), ValidationReport { pass: true, issues: vec![] });
    }
}
