//! File-level ingestion: both formats through `load_preferences`, limits, and
//! digests.

use std::fs;
use std::io::Write;

use ta_core::{SimilarityThreshold, TopicId};
use ta_io::prelude::*;
use ta_io::loader::MAX_INPUT_BYTES;

const SAMPLE_TEXT: &str = "\
Compilers
Operating Systems
Databases

ada@uni.edu
Compilers
Databases

grace@uni.edu
Operating Sytems
Compilers
";

fn write_tmp(dir: &tempfile::TempDir, name: &str, body: &[u8]) -> std::path::PathBuf {
    let p = dir.path().join(name);
    let mut f = fs::File::create(&p).unwrap();
    f.write_all(body).unwrap();
    p
}

#[test]
fn text_file_round_trip_with_correction() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "prefs.txt", SAMPLE_TEXT.as_bytes());

    let got = load_preferences(&p, InputFormat::Auto, SimilarityThreshold::default()).unwrap();
    assert_eq!(got.format, InputFormat::Text);
    assert_eq!(got.store.topics(), ["Compilers", "Operating Systems", "Databases"]);
    assert_eq!(
        got.store.ranking("grace@uni.edu").unwrap().as_slice(),
        &[TopicId::new(1), TopicId::new(0)]
    );
    assert_eq!(got.notices.len(), 1);
    assert_eq!(got.notices[0].line, 10);
    assert!(matches!(got.notices[0].kind, NoticeKind::Corrected { .. }));
    assert_eq!(got.input_sha256, sha256_hex(SAMPLE_TEXT.as_bytes()));
}

#[test]
fn csv_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(
        &dir,
        "prefs.csv",
        b"name,1st,2nd\nada@uni.edu,Compilers,Databases\ngrace@uni.edu,Databases\n",
    );
    let got = load_preferences(&p, InputFormat::Auto, SimilarityThreshold::default()).unwrap();
    assert_eq!(got.format, InputFormat::Tabular);
    assert_eq!(got.store.topics(), ["Compilers", "Databases"]);
    assert_eq!(got.store.participant_count(), 2);
    assert!(got.notices.is_empty());
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "prefs.csv", SAMPLE_TEXT.as_bytes());
    let got = load_preferences(&p, InputFormat::Text, SimilarityThreshold::default()).unwrap();
    assert_eq!(got.store.participant_count(), 2);
}

#[test]
fn ingestion_errors_surface_with_lines() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "bad.txt", b"A\nB\n\nx@y.io\nA\n\nx@y.io\nB\n");
    match load_preferences(&p, InputFormat::Auto, SimilarityThreshold::default()) {
        Err(IoError::Ingest(e)) => assert_eq!(e.line(), Some(7)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn strict_threshold_rejects_typos() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "prefs.txt", b"Compilers\nDatabases\n\nx@y.io\nCompliers\n");
    let lax = SimilarityThreshold::new(0.9).unwrap();
    assert!(load_preferences(&p, InputFormat::Text, lax).is_ok());
    let strict = SimilarityThreshold::new(1.0).unwrap();
    assert!(matches!(
        load_preferences(&p, InputFormat::Text, strict),
        Err(IoError::Ingest(IngestError::UnresolvedPreference { line: 5, .. }))
    ));
}

#[test]
fn non_utf8_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "latin1.txt", b"Caf\xe9\n\n");
    assert!(matches!(
        load_preferences(&p, InputFormat::Text, SimilarityThreshold::default()),
        Err(IoError::Encoding(_))
    ));
}

#[test]
fn oversized_input_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("huge.txt");
    let f = fs::File::create(&p).unwrap();
    f.set_len(MAX_INPUT_BYTES + 1).unwrap();
    assert!(matches!(
        load_preferences(&p, InputFormat::Text, SimilarityThreshold::default()),
        Err(IoError::Limit(_))
    ));
}

#[test]
fn bom_is_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let p = write_tmp(&dir, "bom.txt", "\u{feff}A\nB\n\nx@y.io\nA\n".as_bytes());
    let got = load_preferences(&p, InputFormat::Text, SimilarityThreshold::default()).unwrap();
    assert_eq!(got.store.topics(), ["A", "B"]);
}
