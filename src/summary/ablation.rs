//! Ablation feature bookkeeping
//!
//! An ablation run removes features from a parent featureset and names the
//! variant `<parent>_minus_<dropped>`. Recovering *which* features a variant
//! dropped is a scatter/gather problem: the union of features ever seen for a
//! parent must be built over **all** records before any per-row difference is
//! taken, otherwise a child observed late would be diffed against an
//! incomplete union. The two phases are therefore separate functions.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::record::ResultRecord;
use crate::Result;

/// Substring marking an ablation variant: `<parent>_minus_<dropped features>`.
pub const ABLATION_MARKER: &str = "_minus_";

/// The parent featureset of a (possibly ablated) featureset name.
///
/// Names without the marker are their own parent.
#[must_use]
pub fn parent_featureset(name: &str) -> &str {
    name.split(ABLATION_MARKER).next().unwrap_or(name)
}

/// Union of feature names ever observed across the ablation children of each
/// parent featureset. Grows monotonically during collection, never shrinks,
/// and lives only for the duration of one summary aggregation.
#[derive(Debug, Default)]
pub struct AblationFeatureSet {
    features: HashMap<String, BTreeSet<String>>,
}

impl AblationFeatureSet {
    /// Phase 1 (scatter): collect the per-parent feature union over every
    /// record. A record without the marker is its own parent and contributes
    /// its full feature list, so a parent's union covers everything it ever
    /// carried even when only one ablation child was run.
    ///
    /// # Errors
    ///
    /// Returns an error if a record lacks `featureset_name` or its
    /// `featureset` list cannot be decoded.
    pub fn collect(records: &[ResultRecord]) -> Result<Self> {
        let mut set = Self::default();
        for record in records {
            let parent = parent_featureset(record.featureset_name()?).to_string();
            set.features
                .entry(parent)
                .or_default()
                .extend(record.feature_list()?);
        }
        Ok(set)
    }

    /// Phase 2 (gather): the features this record's parent has ever carried
    /// minus the record's own feature list, serialized as a sorted JSON array.
    /// Empty difference (including a parent with no observed children) renders
    /// as the empty string.
    ///
    /// Must only be called after [`AblationFeatureSet::collect`] has consumed
    /// every record of the aggregation.
    ///
    /// # Errors
    ///
    /// Returns an error if the record lacks `featureset_name` or a decodable
    /// `featureset` list.
    pub fn ablated_features(&self, record: &ResultRecord) -> Result<String> {
        let parent = parent_featureset(record.featureset_name()?);
        let own: BTreeSet<String> = record.feature_list()?.into_iter().collect();

        let ablated: Vec<Value> = self
            .features
            .get(parent)
            .map(|union| union.difference(&own).cloned().map(Value::String).collect())
            .unwrap_or_default();

        if ablated.is_empty() {
            Ok(String::new())
        } else {
            Ok(Value::Array(ablated).to_string())
        }
    }

    /// Number of distinct parent featuresets observed.
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.features.len()
    }
}
