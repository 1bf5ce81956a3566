//! Project configuration (dtsbundle.toml)
//!
//! All three paths have built-in defaults matching the repository layout the
//! tool ships with; a `dtsbundle.toml` at the repository root overrides them,
//! and CLI flags override both.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

fn default_placeholder() -> PathBuf {
    PathBuf::from("types/placeholder.d.ts")
}

fn default_fragments() -> PathBuf {
    PathBuf::from("types")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist/index.d.ts")
}

/// Bundle configuration from dtsbundle.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Placeholder document containing the `@merge-here` markers
    #[serde(default = "default_placeholder")]
    pub placeholder: PathBuf,

    /// Directory under which fragment keys are resolved
    #[serde(default = "default_fragments")]
    pub fragments: PathBuf,

    /// Where the merged bundle is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            fragments: default_fragments(),
            output: default_output(),
        }
    }
}

impl BundleConfig {
    /// Load and parse config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse config from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: BundleConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate path constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [
            ("placeholder", &self.placeholder),
            ("fragments", &self.fragments),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} path must not be empty",
                    name
                )));
            }
        }
        if self.output == self.placeholder {
            return Err(ConfigError::ValidationError(
                "output path must differ from the placeholder path".to_string(),
            ));
        }
        Ok(())
    }
}
