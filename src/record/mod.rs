//! Result records - per-run output of the experimentation tool
//!
//! One [`ResultRecord`] is the JSON mapping written for a single
//! (experiment run x fold) or (experiment run x training-set-size) evaluation.
//! Records are schemaless at the edges (learners attach arbitrary extra fields)
//! but carry a known core: identity fields, scalar outcomes, and - for
//! learning-curve runs - seven parallel per-size sequences.
//!
//! Records are read-only input. The only mutation this crate ever performs is
//! in-place field augmentation (the `metric` rename, the derived
//! `ablated_features` column) before a record is written out.

mod store;

pub use store::load_records;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Fields that appear in result records but are blocks of pre-rendered output,
/// not tabular values. They are excluded from every summary header.
pub const NON_TABULAR_FIELDS: [&str; 2] = ["result_table", "descriptive"];

/// One result record: a mapping from field name to JSON value.
///
/// Core accessors return `Result` when the field is structurally required for
/// the calling operation, and `Option` when it is genuinely optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord {
    fields: Map<String, Value>,
}

impl ResultRecord {
    /// Wrap a raw field mapping as a record.
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Get the underlying field mapping.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Get a raw field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field as a string slice, if present and a string.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Insert or overwrite a field (in-place augmentation before write-out).
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Get the featureset name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the record carries no
    /// `featureset_name`.
    pub fn featureset_name(&self) -> Result<&str> {
        self.require_str("featureset_name")
    }

    /// Get the learner name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if absent.
    pub fn learner_name(&self) -> Result<&str> {
        self.require_str("learner_name")
    }

    /// Get the training-set name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if absent.
    pub fn train_set_name(&self) -> Result<&str> {
        self.require_str("train_set_name")
    }

    /// Get the grid objective name (relabeled `metric` in curve output).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if absent.
    pub fn grid_objective(&self) -> Result<&str> {
        self.require_str("grid_objective")
    }

    /// Decode the serialized `featureset` field into a feature-name list.
    ///
    /// The producing system stores the feature list the way it stores every
    /// other config payload: as a YAML document (a flow sequence such as
    /// `[f1, f2]`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the field is absent and
    /// [`Error::BadField`] if it does not decode to a sequence of strings.
    pub fn feature_list(&self) -> Result<Vec<String>> {
        let raw = self.require_str("featureset")?;
        serde_yaml::from_str(raw).map_err(|e| Error::BadField {
            featureset_name: self.featureset_name().unwrap_or("<unknown>").to_string(),
            field: "featureset".to_string(),
            detail: format!("expected a sequence of feature names: {e}"),
        })
    }

    /// Get the computed training-set sizes for a learning-curve record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if absent and [`Error::BadField`] if
    /// any entry is not a non-negative integer.
    pub fn curve_train_sizes(&self) -> Result<Vec<u64>> {
        let name = "computed_curve_train_sizes";
        let values = self.require_array(name)?;
        values
            .iter()
            .map(|v| {
                v.as_u64().ok_or_else(|| self.bad_field(name, format!("non-integer size {v}")))
            })
            .collect()
    }

    /// Get one of the six parallel mean/std sequences as `f64` values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if absent and [`Error::BadField`] if
    /// any entry is not numeric.
    pub fn curve_values(&self, name: &str) -> Result<Vec<f64>> {
        let values = self.require_array(name)?;
        values
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| self.bad_field(name, format!("non-numeric entry {v}")))
            })
            .collect()
    }

    fn require_str(&self, name: &str) -> Result<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.bad_field(name, format!("expected a string, found {other}"))),
            None => Err(self.missing_field(name)),
        }
    }

    fn require_array(&self, name: &str) -> Result<&Vec<Value>> {
        match self.fields.get(name) {
            Some(Value::Array(values)) => Ok(values),
            Some(other) => Err(self.bad_field(name, format!("expected an array, found {other}"))),
            None => Err(self.missing_field(name)),
        }
    }

    fn missing_field(&self, field: &str) -> Error {
        Error::MissingField {
            featureset_name: self.str_field("featureset_name").unwrap_or("<unknown>").to_string(),
            field: field.to_string(),
        }
    }

    fn bad_field(&self, field: &str, detail: String) -> Error {
        Error::BadField {
            featureset_name: self.str_field("featureset_name").unwrap_or("<unknown>").to_string(),
            field: field.to_string(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ResultRecord {
        let Value::Object(fields) = json else {
            panic!("test record must be an object");
        };
        ResultRecord::from_fields(fields)
    }

    #[test]
    fn test_identity_accessors() {
        let rec = record(serde_json::json!({
            "featureset_name": "A",
            "learner_name": "LogisticRegression",
            "train_set_name": "train",
        }));
        assert_eq!(rec.featureset_name().unwrap(), "A");
        assert_eq!(rec.learner_name().unwrap(), "LogisticRegression");
        assert_eq!(rec.train_set_name().unwrap(), "train");
    }

    #[test]
    fn test_missing_field_names_featureset() {
        let rec = record(serde_json::json!({"featureset_name": "A"}));
        let err = rec.learner_name().unwrap_err();
        assert!(err.to_string().contains("'A'"));
        assert!(err.to_string().contains("learner_name"));
    }

    #[test]
    fn test_feature_list_yaml_flow_sequence() {
        let rec = record(serde_json::json!({
            "featureset_name": "A",
            "featureset": "[f1, f2]",
        }));
        assert_eq!(rec.feature_list().unwrap(), vec!["f1", "f2"]);
    }

    #[test]
    fn test_feature_list_rejects_scalar() {
        let rec = record(serde_json::json!({
            "featureset_name": "A",
            "featureset": "just-a-name",
        }));
        assert!(rec.feature_list().is_err());
    }

    #[test]
    fn test_curve_sizes_reject_floats() {
        let rec = record(serde_json::json!({
            "featureset_name": "A",
            "computed_curve_train_sizes": [10, 20.5],
        }));
        let err = rec.curve_train_sizes().unwrap_err();
        assert!(err.to_string().contains("computed_curve_train_sizes"));
    }

    #[test]
    fn test_set_field_overwrites() {
        let mut rec = record(serde_json::json!({"grid_objective": "f1"}));
        rec.set_field("metric", Value::String("f1".to_string()));
        assert_eq!(rec.str_field("metric"), Some("f1"));
    }
}
