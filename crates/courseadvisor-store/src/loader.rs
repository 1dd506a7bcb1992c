//! Dataset loading: locate the file, decompress, and unwrap the record list.
//!
//! Recognized top-level shapes:
//! - a bare list of sections
//! - `{"report": [...]}`
//! - `{"report": {"rows" | "data" | "sections": [...]}}`

use std::borrow::Cow;
use std::io::BufReader;
use std::path::Path;

use courseadvisor_core::{Error, Result, SectionsConfig};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::types::{Compression, DatasetInfo, LoadedDataset, Section};

const XZ_MAGIC: &[u8] = &[0xFD, b'7', b'z', b'X', b'Z', 0x00];

/// Report keys checked, in order, when `report` is an object.
const REPORT_LIST_KEYS: &[&str] = &["rows", "data", "sections"];

/// Locate and load the dataset described by `config`.
pub fn load_dataset(config: &SectionsConfig) -> Result<LoadedDataset> {
    let path = config.resolve_path().ok_or_else(|| {
        Error::DatasetNotFound(format!(
            "set {} or place one of {} in the working directory",
            courseadvisor_core::config::SECTIONS_PATH_ENV,
            courseadvisor_core::config::DEFAULT_DATASET_FILES.join(" / ")
        ))
    })?;
    load_file(&path)
}

/// Load a dataset from an explicit path.
pub fn load_file(path: &Path) -> Result<LoadedDataset> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::DatasetNotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;

    let fingerprint = hex::encode(Sha256::digest(&bytes));
    let compression = detect_compression(path, &bytes);
    let json = decompress(&bytes, compression)?;

    let raw: Value = serde_json::from_slice(&json)?;
    let rows = extract_records(raw)?;

    let total = rows.len();
    let sections: Vec<Section> = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(fields) => Some(Section::new(fields)),
            _ => None,
        })
        .collect();
    let skipped_rows = total - sections.len();
    if skipped_rows > 0 {
        warn!("Skipped {} non-object rows in {}", skipped_rows, path.display());
    }

    info!(
        "Loaded {} sections from {} ({:?})",
        sections.len(),
        path.display(),
        compression
    );

    let info = DatasetInfo {
        path: path.display().to_string(),
        compression,
        record_count: sections.len(),
        skipped_rows,
        fingerprint,
        loaded_at: chrono::Utc::now(),
    };

    Ok(LoadedDataset { sections, info })
}

/// Unwrap the record list from a parsed dataset document.
pub fn extract_records(raw: Value) -> Result<Vec<Value>> {
    match raw {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut top) => match top.remove("report") {
            Some(Value::Array(rows)) => Ok(rows),
            Some(Value::Object(mut report)) => {
                for key in REPORT_LIST_KEYS {
                    if matches!(report.get(*key), Some(Value::Array(_))) {
                        if let Some(Value::Array(rows)) = report.remove(*key) {
                            return Ok(rows);
                        }
                    }
                }
                Err(Error::Schema(
                    "report object has no rows/data/sections list".into(),
                ))
            }
            Some(_) => Err(Error::Schema("report is neither a list nor an object".into())),
            None => Err(Error::Schema("top-level object has no report key".into())),
        },
        other => Err(Error::Schema(format!(
            "expected a list or an object, found {}",
            json_kind(&other)
        ))),
    }
}

fn detect_compression(path: &Path, bytes: &[u8]) -> Compression {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "lzma" | "xz" if bytes.starts_with(XZ_MAGIC) => Compression::Xz,
        "lzma" | "xz" => Compression::Lzma,
        _ => Compression::None,
    }
}

/// Plain files are borrowed as-is; only compressed input is copied out.
fn decompress(bytes: &[u8], compression: Compression) -> Result<Cow<'_, [u8]>> {
    let mut reader = BufReader::new(bytes);
    let mut out = Vec::new();
    match compression {
        Compression::None => return Ok(Cow::Borrowed(bytes)),
        Compression::Lzma => lzma_rs::lzma_decompress(&mut reader, &mut out),
        Compression::Xz => lzma_rs::xz_decompress(&mut reader, &mut out),
    }
    .map_err(|e| Error::Decompress(e.to_string()))?;
    Ok(Cow::Owned(out))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
