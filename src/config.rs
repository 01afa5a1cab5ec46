//! Build configuration
//!
//! Every field has a serde default so that a partial TOML file (or none at all)
//! yields a usable configuration.

use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when a schema proxy is resolved deeper than `max_depth`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthPolicy {
    /// Store an excessive-depth build error on the proxy
    #[default]
    Error,
    /// Build the schema without its nested children
    Truncate,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Deepest schema level that is built in full
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub depth_policy: DepthPolicy,
    /// Report scalar fields of the wrong YAML kind instead of skipping them
    #[serde(default)]
    pub strict_types: bool,
    /// Fan-outs smaller than this run sequentially
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Size of a dedicated worker pool; `None` shares the global rayon pool
    #[serde(default)]
    pub max_threads: Option<usize>,
    #[serde(default)]
    pub allow_file_references: bool,
    #[serde(default)]
    pub allow_remote_references: bool,
    /// Directory that relative references in the root document resolve against
    #[serde(default)]
    pub base_path: Option<PathBuf>,
    /// URL that relative references in the root document resolve against
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
    #[serde(default)]
    pub skip_circular_check: bool,
}

const fn default_max_depth() -> usize {
    constants::DEFAULT_MAX_DEPTH
}

const fn default_parallel_threshold() -> usize {
    constants::DEFAULT_PARALLEL_THRESHOLD
}

const fn default_remote_timeout_secs() -> u64 {
    constants::DEFAULT_REMOTE_TIMEOUT_SECS
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            depth_policy: DepthPolicy::default(),
            strict_types: false,
            parallel_threshold: default_parallel_threshold(),
            max_threads: None,
            allow_file_references: false,
            allow_remote_references: false,
            base_path: None,
            base_url: None,
            remote_timeout_secs: default_remote_timeout_secs(),
            skip_circular_check: false,
        }
    }
}

impl BuildConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid configuration.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<Self, Error> {
        let content = fs.read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_depth == 0 {
            return Err(Error::invalid_config("max_depth must be greater than 0"));
        }
        if self.parallel_threshold == 0 {
            return Err(Error::invalid_config(
                "parallel_threshold must be greater than 0",
            ));
        }
        if self.max_threads == Some(0) {
            return Err(Error::invalid_config("max_threads must be greater than 0"));
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url).map_err(|e| {
                Error::invalid_config(format!("base_url '{base_url}' is not a valid URL: {e}"))
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize, policy: DepthPolicy) -> Self {
        self.max_depth = max_depth;
        self.depth_policy = policy;
        self
    }

    /// Allows references into other files, resolved against `base_path`
    #[must_use]
    pub fn with_file_references(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.allow_file_references = true;
        self.base_path = Some(base_path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = BuildConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_depth, 30);
        assert_eq!(config.depth_policy, DepthPolicy::Error);
        assert_eq!(config.parallel_threshold, 4);
        assert!(!config.allow_remote_references);
        assert_eq!(config.remote_timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = BuildConfig::from_toml_str(
            "max_depth = 12\ndepth_policy = \"truncate\"\nmax_threads = 2\nstrict_types = true\n",
        )
        .unwrap();
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.depth_policy, DepthPolicy::Truncate);
        assert_eq!(config.max_threads, Some(2));
        assert!(config.strict_types);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = BuildConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(err.to_string().contains("max_depth must be greater than 0"));

        let err = BuildConfig::from_toml_str("max_threads = 0").unwrap_err();
        assert!(err.to_string().contains("max_threads"));

        let err = BuildConfig::from_toml_str("base_url = \"not a url\"").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = BuildConfig::from_toml_str("max_depth = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
