//! Record Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A required field was not present in a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field: {0}")]
pub struct MissingField(pub String);

/// One row of a shipping/inventory sheet
///
/// Field names are normalized to trimmed lowercase; values are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a header/field name
    pub fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.fields.insert(Self::normalize_key(key), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&Self::normalize_key(key))
            .map(String::as_str)
    }

    /// Look up a field, failing when it is absent
    ///
    /// An empty value counts as present.
    pub fn require(&self, key: &str) -> Result<&str, MissingField> {
        self.get(key).ok_or_else(|| MissingField(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(&Self::normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every value is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k.as_ref(), v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_normalized() {
        let mut record = Record::new();
        record.insert("  RazSoc ", "Comercial Andes SpA");

        assert_eq!(record.get("razsoc"), Some("Comercial Andes SpA"));
        assert_eq!(record.get("RAZSOC"), Some("Comercial Andes SpA"));
        assert!(record.contains("razsoc"));
    }

    #[test]
    fn test_require_missing() {
        let record: Record = [("guia", "000123")].into_iter().collect();
        assert_eq!(record.require("guia"), Ok("000123"));
        assert_eq!(
            record.require("bultos"),
            Err(MissingField("bultos".to_string()))
        );
    }

    #[test]
    fn test_is_blank() {
        let record: Record = [("a", " "), ("b", "")].into_iter().collect();
        assert!(record.is_blank());

        let record: Record = [("a", " "), ("b", "x")].into_iter().collect();
        assert!(!record.is_blank());
    }
}
