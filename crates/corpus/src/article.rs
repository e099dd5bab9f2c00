use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

pub const LABEL_FIELD: &str = "label";
pub const TEXT_FIELD: &str = "text";
pub const INDEX_FIELD: &str = "index";
pub const SCORES_FIELD: &str = "scores";

/// A single input record.
///
/// Only `label` and `text` are read, and only `index` and `scores` are
/// written. Every other field passes through untouched and in its original
/// position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article {
    fields: Map<String, Value>,
}

impl Article {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(LABEL_FIELD.to_string(), Value::String(label.into()));
        fields.insert(TEXT_FIELD.to_string(), Value::String(text.into()));
        Self { fields }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The label to judge relevance against. Missing labels read as empty,
    /// non-string labels as their JSON rendering.
    pub fn label(&self) -> Cow<'_, str> {
        match self.fields.get(LABEL_FIELD) {
            None => Cow::Borrowed(""),
            Some(Value::String(label)) => Cow::Borrowed(label.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// The article body. A missing body reads as empty; a body that is not a
    /// string cannot be annotated.
    pub fn text(&self) -> Result<&str> {
        match self.fields.get(TEXT_FIELD) {
            None => Ok(""),
            Some(Value::String(text)) => Ok(text.as_str()),
            Some(other) => bail!("'{}' field is not a string: {}", TEXT_FIELD, other),
        }
    }

    /// Attach the annotation lists. Existing `index`/`scores` fields are
    /// overwritten in place, otherwise both are appended. Scores must be
    /// finite; JSON has no representation for NaN or infinity.
    pub fn set_annotation(&mut self, index: &[i64], scores: &[f64]) {
        self.fields.insert(
            INDEX_FIELD.to_string(),
            Value::Array(index.iter().map(|&i| Value::from(i)).collect()),
        );
        self.fields.insert(
            SCORES_FIELD.to_string(),
            Value::Array(scores.iter().map(|&s| Value::from(s)).collect()),
        );
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(value: Value) -> Article {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let a = article(json!({"title": "No body"}));
        assert_eq!(a.label(), "");
        assert_eq!(a.text().unwrap(), "");
    }

    #[test]
    fn test_non_string_label_is_rendered() {
        let a = article(json!({"label": 42, "text": "x"}));
        assert_eq!(a.label(), "42");
    }

    #[test]
    fn test_non_string_text_is_an_error() {
        let a = article(json!({"label": "x", "text": ["not", "a", "string"]}));
        assert!(a.text().is_err());

        let a = article(json!({"label": "x", "text": null}));
        assert!(a.text().is_err());
    }

    #[test]
    fn test_annotation_is_appended_after_existing_fields() {
        let mut a = article(json!({"id": 7, "label": "architecture", "text": "a b c"}));
        a.set_annotation(&[0, 2], &[0.5, 1.0]);

        let keys: Vec<&str> = a.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "label", "text", "index", "scores"]);
        assert_eq!(a.get("index"), Some(&json!([0, 2])));
        assert_eq!(a.get("scores"), Some(&json!([0.5, 1.0])));
        assert_eq!(a.get("id"), Some(&json!(7)));
    }

    #[test]
    fn test_existing_annotation_is_overwritten_in_place() {
        let mut a = article(json!({"index": [9], "label": "x", "text": "y", "scores": [0.1]}));
        a.set_annotation(&[], &[]);

        let keys: Vec<&str> = a.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["index", "label", "text", "scores"]);
        assert_eq!(a.get("index"), Some(&json!([])));
        assert_eq!(a.get("scores"), Some(&json!([])));
    }
}
