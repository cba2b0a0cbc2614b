//! Wide-to-long reshaping for faceted learning-curve plots
//!
//! The renderer facets score plots by (metric row, learner column) with the
//! melted `variable` mapped to hue, and time plots by learner column. Both
//! need the wide [`CurveTable`] melted into one observation per row.
//!
//! Ordering is part of the contract: `variable` is a closed enum whose
//! comparison order is its declaration order, and each frame carries a
//! sorted, deduplicated learner level list. Repeated runs over identical
//! input therefore facet identically.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{CurvePoint, CurveTable};

/// The melted score variable: which of the two score means a row carries.
///
/// Declaration order is the categorical order used for hue assignment and
/// legend layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreVariable {
    /// Mean training score.
    TrainScoreMean,
    /// Mean cross-validation score.
    TestScoreMean,
}

impl ScoreVariable {
    /// Column name this variant was melted from.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrainScoreMean => "train_score_mean",
            Self::TestScoreMean => "test_score_mean",
        }
    }
}

impl fmt::Display for ScoreVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variable name of every melted time observation.
pub const FIT_TIME_VARIABLE: &str = "fit_time_mean";

/// One melted score row. The two stds ride along as id fields: they are not
/// part of the melt key but the renderer needs them for error bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreObservation {
    /// Featureset evaluated.
    pub featureset_name: String,
    /// Learner evaluated.
    pub learner_name: String,
    /// Scoring metric.
    pub metric: String,
    /// Number of training examples.
    pub training_set_size: u64,
    /// Standard deviation of the training score.
    pub train_score_std: f64,
    /// Standard deviation of the cross-validation score.
    pub test_score_std: f64,
    /// Which score mean this row carries.
    pub variable: ScoreVariable,
    /// The score value.
    pub value: f64,
}

/// One melted fit-time row, after averaging across metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeObservation {
    /// Featureset evaluated.
    pub featureset_name: String,
    /// Learner evaluated.
    pub learner_name: String,
    /// Number of training examples.
    pub training_set_size: u64,
    /// Standard deviation of the fit time, averaged across metrics.
    pub fit_time_std: f64,
    /// Mean fit time in seconds, averaged across metrics.
    pub value: f64,
}

/// Long-form score table plus its categorical level lists.
#[derive(Debug, Clone, Default)]
pub struct ScoreFrame {
    observations: Vec<ScoreObservation>,
    learner_levels: Vec<String>,
    metric_levels: Vec<String>,
}

impl ScoreFrame {
    /// Melted observations, two per wide point (train then test).
    #[must_use]
    pub fn observations(&self) -> &[ScoreObservation] {
        &self.observations
    }

    /// Sorted, deduplicated learner names - the facet column order.
    #[must_use]
    pub fn learner_levels(&self) -> &[String] {
        &self.learner_levels
    }

    /// Sorted, deduplicated metric names - the facet row order.
    #[must_use]
    pub fn metric_levels(&self) -> &[String] {
        &self.metric_levels
    }

    /// The frame restricted to one featureset, keeping the global level
    /// lists so facet layout stays comparable across featuresets.
    #[must_use]
    pub fn restrict_to_featureset(&self, featureset_name: &str) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .filter(|o| o.featureset_name == featureset_name)
                .cloned()
                .collect(),
            learner_levels: self.learner_levels.clone(),
            metric_levels: self.metric_levels.clone(),
        }
    }
}

/// Long-form fit-time table plus its learner levels.
#[derive(Debug, Clone, Default)]
pub struct TimeFrame {
    observations: Vec<TimeObservation>,
    learner_levels: Vec<String>,
}

impl TimeFrame {
    /// Melted observations, one per (featureset, learner, size) group.
    #[must_use]
    pub fn observations(&self) -> &[TimeObservation] {
        &self.observations
    }

    /// Sorted, deduplicated learner names - the facet column order.
    #[must_use]
    pub fn learner_levels(&self) -> &[String] {
        &self.learner_levels
    }
}

/// Converts the wide curve table into the long frames the renderer consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongFormReshaper;

impl LongFormReshaper {
    /// Create a new reshaper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Melt the two score means into `variable`/`value` rows.
    ///
    /// Fit-time fields, version identifiers, and `train_set_name` are
    /// dropped; both score stds are carried on every resulting row.
    #[must_use]
    pub fn melt_scores(&self, table: &CurveTable) -> ScoreFrame {
        let mut observations = Vec::with_capacity(table.points().len() * 2);
        for point in table.points() {
            for variable in [ScoreVariable::TrainScoreMean, ScoreVariable::TestScoreMean] {
                let value = match variable {
                    ScoreVariable::TrainScoreMean => point.train_score_mean,
                    ScoreVariable::TestScoreMean => point.test_score_mean,
                };
                observations.push(ScoreObservation {
                    featureset_name: point.featureset_name.clone(),
                    learner_name: point.learner_name.clone(),
                    metric: point.metric.clone(),
                    training_set_size: point.training_set_size,
                    train_score_std: point.train_score_std,
                    test_score_std: point.test_score_std,
                    variable,
                    value,
                });
            }
        }

        ScoreFrame {
            observations,
            learner_levels: Self::levels(table, |p| &p.learner_name),
            metric_levels: Self::levels(table, |p| &p.metric),
        }
    }

    /// Average fit times across metrics, then melt.
    ///
    /// Fit time does not vary by evaluation metric, so duplicate
    /// (featureset, learner, size) rows are averaged into one before the
    /// melt. Group keys come out of a `BTreeMap`, so output order is
    /// deterministic.
    #[must_use]
    pub fn melt_times(&self, table: &CurveTable) -> TimeFrame {
        #[derive(Default)]
        struct Acc {
            mean_sum: f64,
            std_sum: f64,
            count: usize,
        }

        let mut groups: BTreeMap<(String, String, u64), Acc> = BTreeMap::new();
        for point in table.points() {
            let key = (
                point.featureset_name.clone(),
                point.learner_name.clone(),
                point.training_set_size,
            );
            let acc = groups.entry(key).or_default();
            acc.mean_sum += point.fit_time_mean;
            acc.std_sum += point.fit_time_std;
            acc.count += 1;
        }

        let observations = groups
            .into_iter()
            .map(|((featureset_name, learner_name, training_set_size), acc)| {
                #[allow(clippy::cast_precision_loss)]
                let n = acc.count as f64;
                TimeObservation {
                    featureset_name,
                    learner_name,
                    training_set_size,
                    fit_time_std: acc.std_sum / n,
                    value: acc.mean_sum / n,
                }
            })
            .collect();

        TimeFrame {
            observations,
            learner_levels: Self::levels(table, |p| &p.learner_name),
        }
    }

    fn levels(table: &CurveTable, field: impl Fn(&CurvePoint) -> &String) -> Vec<String> {
        let unique: BTreeSet<&String> = table.points().iter().map(field).collect();
        unique.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(
        featureset: &str,
        learner: &str,
        metric: &str,
        size: u64,
        fit_time_mean: f64,
    ) -> CurvePoint {
        CurvePoint {
            featureset_name: featureset.to_string(),
            learner_name: learner.to_string(),
            metric: metric.to_string(),
            train_set_name: "train".to_string(),
            training_set_size: size,
            train_score_mean: 0.6,
            test_score_mean: 0.5,
            fit_time_mean,
            train_score_std: 0.05,
            test_score_std: 0.04,
            fit_time_std: 0.01,
            backend_version: None,
            version: None,
        }
    }

    #[test]
    fn test_melt_scores_two_rows_per_point() {
        let table = CurveTable::from_points(vec![point("A", "SVC", "f1", 10, 0.1)]);
        let frame = LongFormReshaper::new().melt_scores(&table);

        assert_eq!(frame.observations().len(), 2);
        let train = &frame.observations()[0];
        assert_eq!(train.variable, ScoreVariable::TrainScoreMean);
        assert!((train.value - 0.6).abs() < f64::EPSILON);
        let test = &frame.observations()[1];
        assert_eq!(test.variable, ScoreVariable::TestScoreMean);
        assert!((test.value - 0.5).abs() < f64::EPSILON);

        // Stds ride along on both rows.
        assert!((train.test_score_std - 0.04).abs() < f64::EPSILON);
        assert!((test.train_score_std - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_learner_levels_sorted_and_deduplicated() {
        let table = CurveTable::from_points(vec![
            point("A", "ZLearner", "f1", 10, 0.1),
            point("A", "ALearner", "f1", 10, 0.1),
            point("A", "ZLearner", "f1", 20, 0.1),
        ]);
        let frame = LongFormReshaper::new().melt_scores(&table);
        assert_eq!(frame.learner_levels(), ["ALearner", "ZLearner"]);
    }

    #[test]
    fn test_melt_times_averages_across_metrics() {
        let table = CurveTable::from_points(vec![
            point("A", "SVC", "f1", 10, 0.1),
            point("A", "SVC", "accuracy", 10, 0.3),
        ]);
        let frame = LongFormReshaper::new().melt_times(&table);

        assert_eq!(frame.observations().len(), 1);
        let obs = &frame.observations()[0];
        assert!((obs.value - 0.2).abs() < f64::EPSILON);
        assert!((obs.fit_time_std - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variable_order_is_declaration_order() {
        assert!(ScoreVariable::TrainScoreMean < ScoreVariable::TestScoreMean);
        assert_eq!(ScoreVariable::TrainScoreMean.to_string(), "train_score_mean");
    }

    #[test]
    fn test_restrict_to_featureset_keeps_levels() {
        let table = CurveTable::from_points(vec![
            point("A", "SVC", "f1", 10, 0.1),
            point("B", "Tree", "f1", 10, 0.1),
        ]);
        let frame = LongFormReshaper::new().melt_scores(&table);
        let restricted = frame.restrict_to_featureset("A");

        assert!(restricted.observations().iter().all(|o| o.featureset_name == "A"));
        assert_eq!(restricted.learner_levels(), ["SVC", "Tree"]);
    }
}
