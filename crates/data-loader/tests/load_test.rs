//! Integration tests for loading artifacts from disk.

use data_loader::parser::encode_matrix_bin;
use data_loader::{DataIndex, DataLoadError, SimilarityMatrix, CATALOG_FILE};
use std::fs;
use std::path::Path;

const CATALOG_JSON: &str = r#"[
    {"title": "A", "genres": "Action", "overview": "First."},
    {"title": "B"},
    {"title": "C", "overview": null}
]"#;

const MATRIX_JSON: &str = "[[1.0, 0.5, 0.2], [0.5, 1.0, 0.3], [0.2, 0.3, 1.0]]";

fn write_json_artifacts(dir: &Path) {
    fs::write(dir.join(CATALOG_FILE), CATALOG_JSON).unwrap();
    fs::write(dir.join("similarity.json"), MATRIX_JSON).unwrap();
}

#[test]
fn test_load_json_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_json_artifacts(dir.path());

    let index = DataIndex::load_from_files(dir.path()).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.catalog().position("C"), Some(2));
    assert_eq!(index.similarity().row(0), Some(&[1.0, 0.5, 0.2][..]));
    assert!(index.catalog().get(1).unwrap().genres.is_none());
}

#[test]
fn test_binary_and_json_matrices_agree() {
    let json_dir = tempfile::tempdir().unwrap();
    write_json_artifacts(json_dir.path());
    let from_json = DataIndex::load_from_files(json_dir.path()).unwrap();

    let bin_dir = tempfile::tempdir().unwrap();
    fs::write(bin_dir.path().join(CATALOG_FILE), CATALOG_JSON).unwrap();
    fs::write(
        bin_dir.path().join("similarity.bin"),
        encode_matrix_bin(from_json.similarity()),
    )
    .unwrap();
    let from_bin = DataIndex::load_from_files(bin_dir.path()).unwrap();

    assert_eq!(from_json.similarity(), from_bin.similarity());
}

#[test]
fn test_binary_matrix_preferred_over_json() {
    let dir = tempfile::tempdir().unwrap();
    write_json_artifacts(dir.path());

    let rows = vec![
        vec![1.0, 0.1, 0.1],
        vec![0.1, 1.0, 0.1],
        vec![0.1, 0.1, 1.0],
    ];
    let matrix = SimilarityMatrix::from_rows(rows).unwrap();
    fs::write(dir.path().join("similarity.bin"), encode_matrix_bin(&matrix)).unwrap();

    let index = DataIndex::load_from_files(dir.path()).unwrap();
    assert_eq!(index.similarity().get(0, 1), Some(0.1));
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CATALOG_FILE), CATALOG_JSON).unwrap();
    fs::write(dir.path().join("similarity.json"), "[[1.0, 0.5], [0.5, 1.0]]").unwrap();

    let result = DataIndex::load_from_files(dir.path());
    assert!(matches!(
        result,
        Err(DataLoadError::DimensionMismatch { expected: 3, rows: 2, cols: 2 })
    ));
}

#[test]
fn test_malformed_catalog_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CATALOG_FILE), "{not json").unwrap();
    fs::write(dir.path().join("similarity.json"), "[]").unwrap();

    match DataIndex::load_from_files(dir.path()) {
        Err(DataLoadError::ParseError { file, .. }) => assert_eq!(file, CATALOG_FILE),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_load_explicit_paths() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    let matrix = dir.path().join("scores.json");
    fs::write(&catalog, CATALOG_JSON).unwrap();
    fs::write(&matrix, MATRIX_JSON).unwrap();

    let index = DataIndex::load(&catalog, &matrix).unwrap();
    assert_eq!(index.len(), 3);
}
