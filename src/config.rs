//! Run configuration, read from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{DelineateError, Result};

/// File names of the five output streams.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamNames {
    pub elements: String,
    pub documented: String,
    pub documentation: String,
    pub data: String,
    pub expressions: String,
}

impl Default for StreamNames {
    fn default() -> Self {
        Self {
            elements: "elements.json".to_string(),
            documented: "documented.json".to_string(),
            documentation: "documentation.json".to_string(),
            data: "data.json".to_string(),
            expressions: "expressions.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DelineateConfig {
    pub streams: StreamNames,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Worker count for batch runs; half the cores when unset.
    pub workers: Option<usize>,
}

impl Default for DelineateConfig {
    fn default() -> Self {
        Self {
            streams: StreamNames::default(),
            log_level: "warn".to_string(),
            workers: None,
        }
    }
}

impl DelineateConfig {
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a file, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| DelineateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&text).map_err(|e| DelineateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DelineateConfig::load(None).unwrap();
        assert_eq!(config.streams.elements, "elements.json");
        assert_eq!(config.streams.expressions, "expressions.json");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.workers, None);
    }

    #[test]
    fn test_partial_override() {
        let config = DelineateConfig::from_toml(
            "log_level = \"debug\"\nworkers = 3\n[streams]\ndata = \"meta.json\"\n",
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.streams.data, "meta.json");
        assert_eq!(config.streams.documented, "documented.json");
    }

    #[test]
    fn test_load_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "workers = \"many\"").unwrap();
        let err = DelineateConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, DelineateError::Config { .. }));

        let missing = file.path().with_extension("absent");
        assert!(matches!(
            DelineateConfig::load(Some(&missing)),
            Err(DelineateError::Config { .. })
        ));
    }
}
