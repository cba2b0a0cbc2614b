//! Per-metric y-axis ranges for score plots
//!
//! The plotted band for each curve is mean +/- std, so axis limits must cover
//! the band, not just the means. The clamp is asymmetric: limits get a small
//! visual pad, but an all-non-negative metric (the common case for scores in
//! [0, 1]) is pinned to a lower bound of zero so the axis never crosses it
//! needlessly.

use std::collections::BTreeMap;

use super::reshape::{ScoreFrame, ScoreVariable};
use crate::{Error, Result};

/// Computes per-metric (lower, upper) y-axis bounds from a long-form score
/// frame, typically one already restricted to a single featureset.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisRangeCalculator;

impl AxisRangeCalculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute bounds for every requested metric.
    ///
    /// The computation is pure and idempotent: identical input yields
    /// identical bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMetric`] if a requested metric has no
    /// observations in the frame; callers must filter such metrics out first,
    /// because min/max over an empty band is undefined and would otherwise
    /// turn into garbage plot bounds.
    pub fn compute(
        &self,
        frame: &ScoreFrame,
        metrics: &[String],
    ) -> Result<BTreeMap<String, (f64, f64)>> {
        let mut ranges = BTreeMap::new();
        for metric in metrics {
            ranges.insert(metric.clone(), Self::range_for_metric(frame, metric)?);
        }
        Ok(ranges)
    }

    fn range_for_metric(frame: &ScoreFrame, metric: &str) -> Result<(f64, f64)> {
        let mut min_score = f64::INFINITY;
        let mut max_score = f64::NEG_INFINITY;
        let mut seen = false;

        for obs in frame.observations() {
            if obs.metric != metric {
                continue;
            }
            let std = match obs.variable {
                ScoreVariable::TrainScoreMean => obs.train_score_std,
                ScoreVariable::TestScoreMean => obs.test_score_std,
            };
            min_score = min_score.min(obs.value - std);
            max_score = max_score.max(obs.value + std);
            seen = true;
        }

        if !seen {
            return Err(Error::EmptyMetric {
                metric: metric.to_string(),
            });
        }

        // Squeeze the limits to hide unnecessary parts of the graph: a little
        // buffer on either side, but never past the next integer gridline.
        let lower = if min_score < 0.0 {
            (min_score - 0.1).max(min_score.floor() - 0.05)
        } else {
            0.0
        };
        let upper = if max_score > 0.0 {
            (max_score + 0.1).min(max_score.ceil() + 0.05)
        } else {
            0.0
        };

        Ok((lower, upper))
    }
}
