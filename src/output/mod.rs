//! Output artifacts - tab-separated tables, fold-id dump, text report
//!
//! All writers operate on fully-aggregated in-memory tables, which is what
//! makes aggregation atomic: a failed load never reaches a writer, so a
//! missing input file leaves zero bytes behind.
//!
//! Nothing here computes; these functions only lay out already-derived fields.

use std::collections::BTreeMap;
use std::io::Write;

use serde_json::Value;

use crate::curve::CurveTable;
use crate::record::ResultRecord;
use crate::summary::SummaryTable;
use crate::{Error, Result};

/// Mapping from example id to the cross-validation fold it was tested in.
pub type FoldMapping = BTreeMap<String, u64>;

/// Fixed column order of the learning-curve TSV.
pub const CURVE_HEADER: [&str; 13] = [
    "featureset_name",
    "learner_name",
    "metric",
    "train_set_name",
    "training_set_size",
    "train_score_mean",
    "test_score_mean",
    "fit_time_mean",
    "train_score_std",
    "test_score_std",
    "fit_time_std",
    "backend_version",
    "version",
];

/// Write the summary table as tab-separated values.
///
/// One line per record, honoring the table header; fields absent from a row
/// render empty. Strings render raw, scalars and nested values render as
/// compact JSON.
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn write_summary_tsv<W: Write>(table: &SummaryTable, mut writer: W) -> Result<()> {
    if table.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", table.header().join("\t"))?;
    for row in table.rows() {
        let cells: Vec<String> = table
            .header()
            .iter()
            .map(|column| render_cell(row.field(column)))
            .collect();
        writeln!(writer, "{}", cells.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the wide learning-curve table as tab-separated values with the
/// fixed [`CURVE_HEADER`] column order.
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn write_learning_curve_tsv<W: Write>(table: &CurveTable, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", CURVE_HEADER.join("\t"))?;
    for point in table.points() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            point.featureset_name,
            point.learner_name,
            point.metric,
            point.train_set_name,
            point.training_set_size,
            point.train_score_mean,
            point.test_score_mean,
            point.fit_time_mean,
            point.train_score_std,
            point.test_score_std,
            point.fit_time_std,
            point.backend_version.as_deref().unwrap_or(""),
            point.version.as_deref().unwrap_or(""),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the fold-id mapping as a two-column CSV.
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn write_fold_ids_csv<W: Write>(folds: &FoldMapping, mut writer: W) -> Result<()> {
    writeln!(writer, "id,cv_test_fold")?;
    for (example_id, fold) in folds {
        writeln!(writer, "{example_id},{fold}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Fields printed once, from the first record, at the top of the text report.
const REPORT_HEADER_FIELDS: [(&str, &str); 12] = [
    ("Experiment Name", "experiment_name"),
    ("Version", "version"),
    ("Training Set", "train_set_name"),
    ("Training Set Size", "train_set_size"),
    ("Test Set", "test_set_name"),
    ("Test Set Size", "test_set_size"),
    ("Shuffle", "shuffle"),
    ("Feature Set", "featureset"),
    ("Learner", "learner_name"),
    ("Task", "task"),
    ("Grid Objective Function", "grid_objective"),
    ("Total Time", "total_time"),
];

/// Render the human-readable console report for one experiment run.
///
/// The header block comes from the first record; each record then gets its
/// own fold section with scores and, when present, the pre-rendered result
/// table, descriptive statistics, and additional metrics.
///
/// # Errors
///
/// Returns [`Error::EmptyRecordSet`] when called with no records.
pub fn render_text_report(records: &[ResultRecord]) -> Result<String> {
    let first = records.first().ok_or(Error::EmptyRecordSet)?;

    let mut out = String::new();
    for (label, field) in REPORT_HEADER_FIELDS {
        if let Some(value) = first.field(field) {
            out.push_str(&format!("{label}: {}\n", render_cell(Some(value))));
        }
    }
    out.push('\n');

    for record in records {
        out.push_str(&format!("Fold: {}\n", render_cell(record.field("fold"))));
        out.push_str(&format!(
            "Model Parameters: {}\n",
            render_cell(record.field("model_params"))
        ));
        out.push_str(&format!(
            "Grid Objective Score (Train) = {}\n",
            render_cell(record.field("grid_score"))
        ));

        if let Some(table) = record.str_field("result_table") {
            out.push_str(table);
            out.push('\n');
            out.push_str(&format!(
                "Accuracy = {}\n",
                render_cell(record.field("accuracy"))
            ));
        }

        if let Some(descriptive) = record.field("descriptive") {
            out.push_str("Descriptive statistics:\n");
            for stat in ["min", "max", "avg", "std"] {
                let actual = descriptive_stat(descriptive, "actual", stat);
                let predicted = descriptive_stat(descriptive, "predicted", stat);
                out.push_str(&format!(
                    " {}{} = {actual:.4} (actual), {predicted:.4} (predicted)\n",
                    stat[..1].to_uppercase(),
                    &stat[1..],
                ));
            }
            if let Some(pearson) = record.field("pearson").and_then(Value::as_f64) {
                out.push_str(&format!("Pearson = {pearson:.6}\n"));
            }
        }

        out.push_str(&format!(
            "Objective Function Score (Test) = {}\n",
            render_cell(record.field("score"))
        ));

        if let Some(Value::Object(scores)) = record.field("additional_scores") {
            if !scores.is_empty() {
                out.push_str("\nAdditional Evaluation Metrics (Test):\n");
                for (metric, score) in scores {
                    out.push_str(&format!(" {metric} = {}\n", render_cell(Some(score))));
                }
            }
        }
        out.push('\n');
    }

    Ok(out)
}

/// One cell of tabular or report output. Absent and `null` values render
/// empty (the producing system encodes not-a-number scores as `null`).
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn descriptive_stat(descriptive: &Value, series: &str, stat: &str) -> f64 {
    descriptive
        .get(series)
        .and_then(|s| s.get(stat))
        .and_then(Value::as_f64)
        .unwrap_or(f64::NAN)
}
