//! Append-only JSONL conversation log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use courseadvisor_core::Result;
use parking_lot::Mutex;
use tracing::warn;

use crate::types::{LogEvent, Role};

/// One `{ts, role, text, meta}` object per line. Writes are serialized
/// through a mutex; a failed write is logged and otherwise ignored.
pub struct ConversationLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl ConversationLog {
    /// Open `path` for appending, creating it (and its parent directory)
    /// if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event. `meta` of `None` is written as `{}`.
    pub fn record(&self, role: Role, text: &str, meta: Option<serde_json::Value>) {
        let event = LogEvent {
            ts: chrono::Utc::now().to_rfc3339(),
            role,
            text,
            meta: meta.unwrap_or_else(|| serde_json::json!({})),
        };
        let mut line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode conversation event: {}", e);
                return;
            }
        };
        line.push('\n');

        let mut file = self.file.lock();
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("Failed to write conversation log {}: {}", self.path.display(), e);
        }
    }
}

impl std::fmt::Debug for ConversationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationLog").field("path", &self.path).finish()
    }
}
