//! Summary aggregation - many per-run result files into one table
//!
//! Merges the records of every input file into a single summary table: one
//! row per record, one column per field name observed anywhere in the input.
//! When ablation is enabled the derived `ablated_features` column is computed
//! with an explicit two-phase pass (see [`ablation`]).
//!
//! Aggregation is all-in-memory and atomic: nothing is emitted until every
//! input file has loaded, so a missing file produces zero output rather than a
//! truncated table.

mod ablation;

pub use ablation::{parent_featureset, AblationFeatureSet, ABLATION_MARKER};

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::record::{load_records, ResultRecord, NON_TABULAR_FIELDS};
use crate::Result;

/// Derived column added to the header when ablation is enabled.
pub const ABLATED_FEATURES_FIELD: &str = "ablated_features";

/// Aggregates per-run result files into a [`SummaryTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator {
    ablation: u32,
}

impl SummaryAggregator {
    /// Create an aggregator with ablation-feature derivation disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator for an ablation experiment.
    ///
    /// `ablation` is the number of features removed per ablation step; any
    /// non-zero value enables `ablated_features` derivation.
    #[must_use]
    pub fn with_ablation(ablation: u32) -> Self {
        Self { ablation }
    }

    /// Whether ablation-feature derivation runs.
    #[must_use]
    pub fn ablation_enabled(&self) -> bool {
        self.ablation != 0
    }

    /// Load every result file and merge the records into a summary table.
    ///
    /// # Errors
    ///
    /// Propagates loading failures (missing/malformed files) and, when
    /// ablation is enabled, missing or undecodable `featureset` fields.
    pub fn aggregate<P: AsRef<Path>>(&self, paths: &[P]) -> Result<SummaryTable> {
        let mut records = load_records(paths)?;
        if records.is_empty() {
            warn!("no result records loaded; summary table will be empty");
            return Ok(SummaryTable {
                header: Vec::new(),
                rows: Vec::new(),
            });
        }

        if self.ablation_enabled() {
            // Phase 1 must observe all ablation children before any row is
            // diffed in phase 2.
            let features = AblationFeatureSet::collect(&records)?;
            for record in &mut records {
                let ablated = features.ablated_features(record)?;
                record.set_field(ABLATED_FEATURES_FIELD, Value::String(ablated));
            }
        } else {
            for record in &records {
                if let Some(name) = record.str_field("featureset_name") {
                    if name.contains(ABLATION_MARKER) {
                        warn!(
                            featureset_name = name,
                            "featureset name carries the ablation marker but ablation \
                             is disabled; treating as an ordinary row"
                        );
                    }
                }
            }
        }

        let header = Self::build_header(&records);
        info!(rows = records.len(), columns = header.len(), "summary aggregated");

        Ok(SummaryTable {
            header,
            rows: records,
        })
    }

    /// Sorted union of field names over all records, minus the non-tabular
    /// blocks. `ablated_features` is always present in the rows at this point
    /// when ablation is enabled, so the union picks it up naturally.
    fn build_header(records: &[ResultRecord]) -> Vec<String> {
        let mut columns: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.fields().keys())
            .map(String::as_str)
            .collect();
        for field in NON_TABULAR_FIELDS {
            columns.remove(field);
        }
        columns.into_iter().map(str::to_string).collect()
    }
}

/// The merged summary: a sorted header and one row per input record.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    header: Vec<String>,
    rows: Vec<ResultRecord>,
}

impl SummaryTable {
    /// Column names, sorted.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Rows in load order.
    #[must_use]
    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }

    /// True when no records were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn write_records(dir: &tempfile::TempDir, name: &str, records: Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, records.to_string()).unwrap();
        path
    }

    #[test]
    fn test_header_is_union_over_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(
            &dir,
            "r.json",
            serde_json::json!([
                {"featureset_name": "A", "score": 0.8},
                {"featureset_name": "B", "pearson": 0.5},
            ]),
        );

        let table = SummaryAggregator::new().aggregate(&[path]).unwrap();
        assert_eq!(table.header(), ["featureset_name", "pearson", "score"]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_non_tabular_fields_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(
            &dir,
            "r.json",
            serde_json::json!([
                {"featureset_name": "A", "result_table": "...", "descriptive": {}},
            ]),
        );

        let table = SummaryAggregator::new().aggregate(&[path]).unwrap();
        assert_eq!(table.header(), ["featureset_name"]);
    }

    #[test]
    fn test_ablated_features_absent_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(
            &dir,
            "r.json",
            serde_json::json!([
                {"featureset_name": "A_minus_f1", "featureset": "[f2]"},
            ]),
        );

        let table = SummaryAggregator::new().aggregate(&[path]).unwrap();
        assert!(!table.header().contains(&ABLATED_FEATURES_FIELD.to_string()));
    }

    #[test]
    fn test_ablation_example_from_two_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(
            &dir,
            "r.json",
            serde_json::json!([
                {"featureset_name": "A", "featureset": "[f1, f2]"},
                {"featureset_name": "A_minus_f1", "featureset": "[f2]"},
            ]),
        );

        let table = SummaryAggregator::with_ablation(1).aggregate(&[path]).unwrap();
        assert!(table.header().contains(&ABLATED_FEATURES_FIELD.to_string()));

        let values: Vec<_> = table
            .rows()
            .iter()
            .map(|r| r.str_field(ABLATED_FEATURES_FIELD).unwrap())
            .collect();
        assert_eq!(values, vec!["", r#"["f1"]"#]);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(&dir, "r.json", serde_json::json!([]));

        let table = SummaryAggregator::new().aggregate(&[path]).unwrap();
        assert!(table.is_empty());
        assert!(table.header().is_empty());
    }
}
