//! Summary Aggregation Example
//!
//! Demonstrates merging per-run result files into a single summary table,
//! with ablation-feature derivation enabled.
//!
//! Run with: cargo run --example aggregate_results

use std::fs;

use resumen::output::write_summary_tsv;
use resumen::summary::SummaryAggregator;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Resumen Summary Aggregation ===\n");

    let dir = tempfile::tempdir()?;

    // -------------------------------------------------------------------------
    // 1. Write two per-run result files: a parent featureset and an ablation
    //    variant with one feature removed
    // -------------------------------------------------------------------------
    println!("1. Writing result files...");

    let parent = dir.path().join("parent.json");
    fs::write(
        &parent,
        serde_json::json!([
            {
                "featureset_name": "readability",
                "featureset": "[word_count, sentence_len, syllables]",
                "learner_name": "LinearRegression",
                "train_set_name": "essays",
                "grid_score": 0.71,
                "score": 0.68,
            }
        ])
        .to_string(),
    )?;

    let ablated = dir.path().join("ablated.json");
    fs::write(
        &ablated,
        serde_json::json!([
            {
                "featureset_name": "readability_minus_syllables",
                "featureset": "[word_count, sentence_len]",
                "learner_name": "LinearRegression",
                "train_set_name": "essays",
                "grid_score": 0.64,
                "score": 0.61,
            }
        ])
        .to_string(),
    )?;

    // -------------------------------------------------------------------------
    // 2. Aggregate with ablation enabled
    // -------------------------------------------------------------------------
    println!("2. Aggregating with ablation = 1...\n");

    let table = SummaryAggregator::with_ablation(1).aggregate(&[parent, ablated])?;
    println!("   Rows: {}", table.rows().len());
    println!("   Columns: {:?}\n", table.header());

    // -------------------------------------------------------------------------
    // 3. Render the TSV artifact
    // -------------------------------------------------------------------------
    println!("3. Summary TSV:\n");

    let mut buffer = Vec::new();
    write_summary_tsv(&table, &mut buffer)?;
    println!("{}", String::from_utf8(buffer)?);

    Ok(())
}
