//! Learning-Curve Pipeline Example
//!
//! Demonstrates the full curve path: aggregate result files into the wide
//! table, melt to long form, and compute per-metric axis ranges.
//!
//! Run with: cargo run --example curve_pipeline

use std::fs;

use resumen::curve::axis::AxisRangeCalculator;
use resumen::curve::reshape::LongFormReshaper;
use resumen::curve::LearningCurveAggregator;
use resumen::output::write_learning_curve_tsv;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Resumen Learning-Curve Pipeline ===\n");

    let dir = tempfile::tempdir()?;
    let results = dir.path().join("curve_run.json");
    fs::write(
        &results,
        serde_json::json!([
            {
                "featureset_name": "bag_of_words",
                "learner_name": "MultinomialNB",
                "grid_objective": "f1",
                "train_set_name": "reviews",
                "computed_curve_train_sizes": [100, 500, 2500],
                "learning_curve_train_scores_means": [0.92, 0.88, 0.85],
                "learning_curve_test_scores_means": [0.61, 0.72, 0.79],
                "learning_curve_fit_times_means": [0.02, 0.09, 0.41],
                "learning_curve_train_scores_stds": [0.01, 0.02, 0.01],
                "learning_curve_test_scores_stds": [0.06, 0.04, 0.02],
                "learning_curve_fit_times_stds": [0.002, 0.008, 0.03],
            }
        ])
        .to_string(),
    )?;

    // -------------------------------------------------------------------------
    // 1. Flatten the parallel per-size arrays into wide rows
    // -------------------------------------------------------------------------
    println!("1. Aggregating learning-curve records...\n");

    let table = LearningCurveAggregator::new().aggregate(&[results])?;
    let mut buffer = Vec::new();
    write_learning_curve_tsv(&table, &mut buffer)?;
    println!("{}", String::from_utf8(buffer)?);

    // -------------------------------------------------------------------------
    // 2. Melt to long form for faceted plotting
    // -------------------------------------------------------------------------
    println!("2. Melting to long form...\n");

    let reshaper = LongFormReshaper::new();
    let scores = reshaper.melt_scores(&table);
    let times = reshaper.melt_times(&table);
    println!("   Score observations: {}", scores.observations().len());
    println!("   Time observations:  {}", times.observations().len());
    println!("   Learner levels:     {:?}\n", scores.learner_levels());

    // -------------------------------------------------------------------------
    // 3. Compute per-metric y-axis ranges
    // -------------------------------------------------------------------------
    println!("3. Axis ranges:\n");

    let per_featureset = scores.restrict_to_featureset("bag_of_words");
    let metrics = per_featureset.metric_levels().to_vec();
    let ranges = AxisRangeCalculator::new().compute(&per_featureset, &metrics)?;
    for (metric, (lower, upper)) in &ranges {
        println!("   {metric}: [{lower:.2}, {upper:.2}]");
    }

    Ok(())
}
