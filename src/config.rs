//! Build configuration loaded from TOML.
//!
//! ```toml
//! serializer = "json"
//! continue_on_error = true
//! ```

use opdesc_core::SerializerPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Serializer selectable from configuration or the command line.
///
/// User serializers are code, so they are only available through the
/// library API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SerializerKind {
    #[default]
    None,
    Json,
}

impl SerializerKind {
    pub fn policy(self) -> SerializerPolicy {
        match self {
            Self::None => SerializerPolicy::None,
            Self::Json => SerializerPolicy::Json,
        }
    }
}

/// Settings for building operations from a stream of descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Encoding for opaque values
    pub serializer: SerializerKind,

    /// Keep going after a descriptor fails to build
    pub continue_on_error: bool,
}

impl BuildConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::from_toml_str("").unwrap();
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.serializer, SerializerKind::None);
        assert!(!config.continue_on_error);
    }

    #[test]
    fn test_from_toml_str() {
        let config =
            BuildConfig::from_toml_str("serializer = \"json\"\ncontinue_on_error = true\n").unwrap();
        assert_eq!(config.serializer, SerializerKind::Json);
        assert!(config.continue_on_error);
        assert_eq!(config.serializer.policy().name(), "json");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = BuildConfig::from_toml_str("serialiser = \"json\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "serializer = \"none\"").unwrap();
        writeln!(file, "continue_on_error = true").unwrap();

        let config = BuildConfig::from_file(file.path()).unwrap();
        assert_eq!(config.serializer, SerializerKind::None);
        assert!(config.continue_on_error);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
