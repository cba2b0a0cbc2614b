//! Error types for resumen
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People).
//! Every fatal variant names the offending input path, record, or metric so a bad
//! aggregation run can be root-caused from the message alone.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Resumen error types
#[derive(Error, Debug)]
pub enum Error {
    /// A named result file does not exist; the whole aggregation is aborted
    #[error("Result file not found: {}\nNo partial output was written. Re-run the experiment or fix the path list.", .path.display())]
    MissingInput {
        /// Path that was requested but not present on disk
        path: PathBuf,
    },

    /// A result file exists but could not be parsed into a record array
    #[error("Malformed result file {}: {detail}", .path.display())]
    MalformedInput {
        /// Path of the offending file
        path: PathBuf,
        /// Parse-level detail (JSON error, wrong top-level shape, bad field type)
        detail: String,
    },

    /// A record is missing a structurally required field
    #[error("Record for featureset '{featureset_name}' is missing required field '{field}'")]
    MissingField {
        /// Featureset the record belongs to (or "<unknown>" when absent itself)
        featureset_name: String,
        /// Name of the missing field
        field: String,
    },

    /// A record field exists but could not be decoded as the expected shape
    #[error("Bad field '{field}' on record for featureset '{featureset_name}': {detail}")]
    BadField {
        /// Featureset the record belongs to
        featureset_name: String,
        /// Name of the offending field
        field: String,
        /// What was expected and what was found
        detail: String,
    },

    /// Parallel learning-curve sequences within one record disagree on length
    #[error("Ragged learning-curve record (featureset '{featureset_name}', learner '{learner_name}'): field '{field}' has {actual} entries, expected {expected}")]
    RaggedCurve {
        /// Featureset of the offending record
        featureset_name: String,
        /// Learner of the offending record
        learner_name: String,
        /// Name of the mismatched array field
        field: String,
        /// Length of `computed_curve_train_sizes`
        expected: usize,
        /// Length actually observed
        actual: usize,
    },

    /// Axis-range computation was requested for a metric with zero observations
    #[error("No observations for metric '{metric}': filter out metrics with no data before computing axis ranges")]
    EmptyMetric {
        /// The metric that had no matching rows
        metric: String,
    },

    /// A text report was requested over an empty record set
    #[error("Result record list is empty")]
    EmptyRecordSet,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
