//! # Resumen: Experiment-Result Aggregation & Learning-Curve Reshaping
//!
//! Resumen merges the per-run JSON result records written by an ML
//! experimentation tool into unified tab-separated tables, and derives the
//! long-form, statistically-summarized views a plotting backend needs to
//! render learning curves.
//!
//! ## Pipeline
//!
//! ```text
//! result JSON files ──> SummaryAggregator ──────────> summary TSV
//!                  └──> LearningCurveAggregator ──> wide CurveTable ──> TSV
//!                                                        │
//!                                 LongFormReshaper ──────┤
//!                                 (ScoreFrame, TimeFrame)│
//!                                 AxisRangeCalculator <──┘
//! ```
//!
//! Aggregation is atomic by construction: every input file is loaded and
//! validated before any output is written, so a missing or malformed file
//! produces an error and zero bytes of output, never a truncated table.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use resumen::curve::reshape::LongFormReshaper;
//! use resumen::curve::LearningCurveAggregator;
//!
//! let table = LearningCurveAggregator::new()
//!     .aggregate(&["results/run_1.json", "results/run_2.json"])?;
//! let scores = LongFormReshaper::new().melt_scores(&table);
//! println!("{} observations", scores.observations().len());
//! # Ok::<(), resumen::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod curve;
pub mod error;
pub mod output;
pub mod record;
pub mod summary;

pub use error::{Error, Result};
