//! Result record loading
//!
//! Loads an ordered list of per-run result files, each a JSON document whose
//! top level is an array of record mappings. Loading is all-or-nothing: a
//! missing or malformed file aborts the whole aggregation, because a consumer
//! cannot tell a truncated summary from a complete one. Writers only run on
//! fully-aggregated tables, so a failed load writes zero bytes.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::ResultRecord;
use crate::{Error, Result};

/// Load and concatenate result records from an ordered sequence of paths.
///
/// Records keep their input order (file order, then in-file order). No
/// deduplication is performed.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] naming the first path that does not exist,
/// or [`Error::MalformedInput`] if a file is not a JSON array of objects.
pub fn load_records<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ResultRecord>> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInput {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let batch: Vec<Map<String, Value>> =
            serde_json::from_str(&contents).map_err(|e| Error::MalformedInput {
                path: path.to_path_buf(),
                detail: format!("expected a top-level array of record objects: {e}"),
            })?;

        debug!(path = %path.display(), records = batch.len(), "loaded result file");
        records.extend(batch.into_iter().map(ResultRecord::from_fields));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_concatenates_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(&dir, "a.json", r#"[{"featureset_name": "A"}]"#);
        let second = write_file(
            &dir,
            "b.json",
            r#"[{"featureset_name": "B1"}, {"featureset_name": "B2"}]"#,
        );

        let records = load_records(&[first, second]).unwrap();
        let names: Vec<_> = records
            .iter()
            .map(|r| r.featureset_name().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B1", "B2"]);
    }

    #[test]
    fn test_missing_file_aborts_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let present = write_file(&dir, "a.json", "[]");
        let absent = dir.path().join("nope.json");

        let err = load_records(&[present, absent.clone()]).unwrap_err();
        match err {
            Error::MissingInput { path } => assert_eq!(path, absent),
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(&dir, "bad.json", "{not json");

        let err = load_records(&[bad]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_top_level_object_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(&dir, "obj.json", r#"{"featureset_name": "A"}"#);

        let err = load_records(&[bad]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }
}
