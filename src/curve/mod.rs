//! Learning-curve aggregation - parallel per-size arrays into wide rows
//!
//! A learning-curve result record carries seven parallel sequences, one entry
//! per evaluated training-set size: the sizes themselves plus mean/std pairs
//! for train score, test score, and fit time. Aggregation explodes them
//! positionally into one [`CurvePoint`] per (record x size index).
//!
//! The flattening is a fixed-arity structural decomposition: every array is
//! length-checked against `computed_curve_train_sizes` before any point is
//! built, so a ragged record fails loudly instead of truncating.

pub mod axis;
pub mod reshape;

use std::path::Path;

use tracing::info;

use crate::record::{load_records, ResultRecord};
use crate::{Error, Result};

/// One row of the wide learning-curve table: a single training-set-size
/// observation for one (featureset, learner, metric) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    /// Featureset evaluated.
    pub featureset_name: String,
    /// Learner evaluated.
    pub learner_name: String,
    /// Scoring metric, carried over from the record's `grid_objective`
    /// (a rename, not a computation).
    pub metric: String,
    /// Name of the training set the curve was computed on.
    pub train_set_name: String,
    /// Number of training examples at this curve point.
    pub training_set_size: u64,
    /// Mean training score across folds.
    pub train_score_mean: f64,
    /// Mean cross-validation score across folds.
    pub test_score_mean: f64,
    /// Mean model fit time in seconds.
    pub fit_time_mean: f64,
    /// Standard deviation of the training score.
    pub train_score_std: f64,
    /// Standard deviation of the cross-validation score.
    pub test_score_std: f64,
    /// Standard deviation of the fit time.
    pub fit_time_std: f64,
    /// Version of the learning backend, when the record carries it.
    pub backend_version: Option<String>,
    /// Version of the experimentation tool, when the record carries it.
    pub version: Option<String>,
}

/// The wide learning-curve table: one point per (record x size index).
#[derive(Debug, Clone, Default)]
pub struct CurveTable {
    points: Vec<CurvePoint>,
}

impl CurveTable {
    /// Build a table directly from points (mainly for tests and benches).
    #[must_use]
    pub fn from_points(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    /// All points, in record order then size order.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// True when no points were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The six mean/std sequences exploded alongside the train sizes.
const CURVE_VALUE_FIELDS: [&str; 6] = [
    "learning_curve_train_scores_means",
    "learning_curve_test_scores_means",
    "learning_curve_fit_times_means",
    "learning_curve_train_scores_stds",
    "learning_curve_test_scores_stds",
    "learning_curve_fit_times_stds",
];

/// Aggregates learning-curve result files into a [`CurveTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LearningCurveAggregator;

impl LearningCurveAggregator {
    /// Create a new aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load every result file and flatten each record's parallel sequences.
    ///
    /// # Errors
    ///
    /// Propagates loading failures, missing curve fields, and
    /// [`Error::RaggedCurve`] for length-mismatched sequences.
    pub fn aggregate<P: AsRef<Path>>(&self, paths: &[P]) -> Result<CurveTable> {
        let records = load_records(paths)?;

        let mut points = Vec::new();
        for record in &records {
            points.extend(Self::flatten_record(record)?);
        }

        info!(records = records.len(), points = points.len(), "learning curves aggregated");
        Ok(CurveTable { points })
    }

    /// Explode one record into one point per training-set size.
    fn flatten_record(record: &ResultRecord) -> Result<Vec<CurvePoint>> {
        let featureset_name = record.featureset_name()?.to_string();
        let learner_name = record.learner_name()?.to_string();
        let metric = record.grid_objective()?.to_string();
        let train_set_name = record.train_set_name()?.to_string();
        let backend_version = record.str_field("backend_version").map(str::to_string);
        let version = record.str_field("version").map(str::to_string);

        let sizes = record.curve_train_sizes()?;

        // Fixed-arity decomposition: pull all six sequences, then verify each
        // against the size axis before building a single point.
        let mut sequences = Vec::with_capacity(CURVE_VALUE_FIELDS.len());
        for field in CURVE_VALUE_FIELDS {
            let values = record.curve_values(field)?;
            if values.len() != sizes.len() {
                return Err(Error::RaggedCurve {
                    featureset_name,
                    learner_name,
                    field: field.to_string(),
                    expected: sizes.len(),
                    actual: values.len(),
                });
            }
            sequences.push(values);
        }
        let (train_means, test_means, fit_means, train_stds, test_stds, fit_stds) = (
            &sequences[0],
            &sequences[1],
            &sequences[2],
            &sequences[3],
            &sequences[4],
            &sequences[5],
        );

        let points = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| CurvePoint {
                featureset_name: featureset_name.clone(),
                learner_name: learner_name.clone(),
                metric: metric.clone(),
                train_set_name: train_set_name.clone(),
                training_set_size: size,
                train_score_mean: train_means[i],
                test_score_mean: test_means[i],
                fit_time_mean: fit_means[i],
                train_score_std: train_stds[i],
                test_score_std: test_stds[i],
                fit_time_std: fit_stds[i],
                backend_version: backend_version.clone(),
                version: version.clone(),
            })
            .collect();

        Ok(points)
    }
}
