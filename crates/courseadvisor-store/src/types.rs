//! Store types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw section record as it appears in the dataset.
///
/// The schema is not owned by this crate: any key may be absent, null,
/// blank, or hold a number where a string was expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(Map<String, Value>);

impl Section {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value for `key` coerced to trimmed text. Strings are trimmed, numbers
    /// keep their JSON rendering, everything else (including a missing key)
    /// reads as `""`.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// First non-blank value among `keys`, in order.
    pub fn first_text(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|k| self.text(k))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Section {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Compression of the dataset file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    None,
    /// Legacy `.lzma` (LZMA-alone) stream.
    Lzma,
    /// `.xz` container.
    Xz,
}

/// Diagnostics about the loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub path: String,
    pub compression: Compression,
    #[serde(rename = "recordCount")]
    pub record_count: usize,
    /// Rows dropped because they were not JSON objects.
    #[serde(rename = "skippedRows")]
    pub skipped_rows: usize,
    /// SHA-256 of the file bytes as stored on disk.
    pub fingerprint: String,
    #[serde(rename = "loadedAt")]
    pub loaded_at: DateTime<Utc>,
}

/// A loaded dataset: the records plus how they were obtained.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub sections: Vec<Section>,
    pub info: DatasetInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(v: Value) -> Section {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_text_coercion() {
        let s = section(serde_json::json!({
            "Subject": "  CS ",
            "Crs_Number": 262,
            "Hours": 3.5,
            "Desc": null,
            "Open": true,
            "Tags": ["a"],
        }));
        assert_eq!(s.text("Subject"), "CS");
        assert_eq!(s.text("Crs_Number"), "262");
        assert_eq!(s.text("Hours"), "3.5");
        assert_eq!(s.text("Desc"), "");
        assert_eq!(s.text("Open"), "");
        assert_eq!(s.text("Tags"), "");
        assert_eq!(s.text("Missing"), "");
    }

    #[test]
    fn test_first_text_skips_blank() {
        let s = section(serde_json::json!({
            "Section_Title": "   ",
            "CourseTitle": "Software Eng",
        }));
        assert_eq!(s.first_text(&["Section_Title", "CourseTitle"]), "Software Eng");
        assert_eq!(s.first_text(&["Nope"]), "");
    }

    #[test]
    fn test_transparent_serde() {
        let raw = serde_json::json!({"Subject": "CS", "Crs_Number": 262});
        let s = section(raw.clone());
        assert_eq!(serde_json::to_value(&s).unwrap(), raw);
    }
}
