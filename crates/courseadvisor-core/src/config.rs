//! Configuration: dataset location, server port, conversation log.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable overriding the dataset path.
pub const SECTIONS_PATH_ENV: &str = "SECTIONS_PATH";

/// Filenames probed, in order, when no path override is set.
pub const DEFAULT_DATASET_FILES: &[&str] = &[
    "Sections-26SP.json.lzma",
    "Sections-26SP.json",
    "sections.json.lzma",
    "sections.json",
];

/// Where to find the sections dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsConfig {
    /// Explicit dataset path (from `SECTIONS_PATH` or a CLI flag).
    pub path_override: Option<PathBuf>,
    /// Candidate files probed in order when there is no override.
    pub default_paths: Vec<PathBuf>,
}

impl SectionsConfig {
    /// Config pinned to a single file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path_override: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// The path the loader should open: the override if set, otherwise the
    /// first default candidate that exists.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path_override {
            return Some(path.clone());
        }
        self.default_paths.iter().find(|p| p.exists()).cloned()
    }
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            path_override: None,
            default_paths: DEFAULT_DATASET_FILES.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Top-level advisor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// HTTP server port.
    pub port: u16,
    /// Dataset location.
    pub sections: SectionsConfig,
    /// JSONL conversation log; `None` disables logging.
    pub conversation_log: Option<PathBuf>,
    /// Row limit the intent resolver attaches to combined-filter calls.
    pub result_limit: usize,
}

impl AdvisorConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Create configuration from `lookup`, which maps variable names to
    /// values. Unset variables take their defaults; malformed ones are errors.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = parse_var::<u16>(&lookup, "PORT")?.unwrap_or(3003);

        let result_limit = parse_var::<usize>(&lookup, "ADVISOR_RESULT_LIMIT")?.unwrap_or(20);
        if result_limit == 0 {
            return Err(Error::Config("ADVISOR_RESULT_LIMIT must be at least 1".into()));
        }

        let conversation_log = match lookup("CONVO_LOG") {
            Some(p) if p.trim().is_empty() || p == "off" => None,
            Some(p) => Some(PathBuf::from(p)),
            None => Some(PathBuf::from("conversations.jsonl")),
        };

        let sections = SectionsConfig {
            path_override: lookup(SECTIONS_PATH_ENV)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ..SectionsConfig::default()
        };

        Ok(Self {
            port,
            sections,
            conversation_log,
            result_limit,
        })
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}={:?}: {}", name, raw, e))),
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            port: 3003,
            sections: SectionsConfig::default(),
            conversation_log: None,
            result_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = SectionsConfig::with_path("/nowhere/sections.json");
        assert_eq!(config.resolve_path(), Some(PathBuf::from("/nowhere/sections.json")));
    }

    #[test]
    fn test_probes_existing_default() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("sections.json");
        std::fs::write(&second, "[]").unwrap();

        let config = SectionsConfig {
            path_override: None,
            default_paths: vec![dir.path().join("Sections-26SP.json"), second.clone()],
        };
        assert_eq!(config.resolve_path(), Some(second));
    }

    #[test]
    fn test_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = SectionsConfig {
            path_override: None,
            default_paths: vec![dir.path().join("sections.json")],
        };
        assert!(config.resolve_path().is_none());
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = AdvisorConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.port, 3003);
        assert_eq!(config.result_limit, 20);
        assert_eq!(config.conversation_log, Some(PathBuf::from("conversations.jsonl")));
        assert!(config.sections.path_override.is_none());
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = AdvisorConfig::from_vars(vars(&[
            ("PORT", "8080"),
            ("ADVISOR_RESULT_LIMIT", " 5 "),
            ("CONVO_LOG", "off"),
            ("SECTIONS_PATH", "/data/sections.json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.result_limit, 5);
        assert!(config.conversation_log.is_none());
        assert_eq!(config.sections.resolve_path(), Some(PathBuf::from("/data/sections.json")));
    }

    #[test]
    fn test_malformed_vars_are_config_errors() {
        for pairs in [
            &[("PORT", "eighty")][..],
            &[("PORT", "70000")][..],
            &[("ADVISOR_RESULT_LIMIT", "-3")][..],
            &[("ADVISOR_RESULT_LIMIT", "0")][..],
        ] {
            let err = AdvisorConfig::from_vars(vars(pairs)).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{pairs:?}");
            assert!(!err.is_dataset_failure());
        }
        let err = AdvisorConfig::from_vars(vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_default_probe_order() {
        let config = SectionsConfig::default();
        let names: Vec<_> = config
            .default_paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names[0], "Sections-26SP.json.lzma");
        assert_eq!(names[3], "sections.json");
    }
}
