//! Configuration for schema inference

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// Default number of head lines sampled for separator detection
pub const DEFAULT_SAMPLE_LINES: usize = 10;

/// Default upper bound of one sampler partition (128 MiB)
pub const DEFAULT_MAX_PARTITION_BYTES: u64 = 128 * 1024 * 1024;

/// Default minimum number of sampler partitions
pub const DEFAULT_MIN_PARTITIONS: usize = 2;

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Number of head lines sampled for separator detection
    pub sample_lines: usize,

    /// Maximum size in bytes of one sampler partition
    pub max_partition_bytes: u64,

    /// Minimum number of partitions a non-trivial file is split into
    pub min_partitions: usize,

    /// Explicit separator; skips detection when set
    pub separator: Option<char>,

    /// Escape regex metacharacters of the file name when deriving the pattern
    pub escape_pattern: bool,

    /// Maximum number of rows inspected for typing (0 = all)
    pub max_rows: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_lines: DEFAULT_SAMPLE_LINES,
            max_partition_bytes: DEFAULT_MAX_PARTITION_BYTES,
            min_partitions: DEFAULT_MIN_PARTITIONS,
            separator: None,
            escape_pattern: true,
            max_rows: 0,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    ///
    /// Missing keys take their default value.
    pub fn from_toml_str(content: &str) -> Result<Self, InferenceError> {
        let config: InferenceConfig =
            toml::from_str(content).map_err(|e| InferenceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, InferenceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the configuration values are usable
    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.sample_lines == 0 {
            return Err(InferenceError::Config(
                "sampleLines must be at least 1".to_string(),
            ));
        }
        if self.min_partitions == 0 {
            return Err(InferenceError::Config(
                "minPartitions must be at least 1".to_string(),
            ));
        }
        if self.max_partition_bytes == 0 {
            return Err(InferenceError::Config(
                "maxPartitionBytes must be at least 1".to_string(),
            ));
        }
        if let Some(separator) = self.separator
            && matches!(separator, '\n' | '\r')
        {
            return Err(InferenceError::Config(
                "separator cannot be a line terminator".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the number of head lines sampled for separator detection
    pub fn sample_lines(mut self, lines: usize) -> Self {
        self.config.sample_lines = lines.max(1);
        self
    }

    /// Set the maximum partition size in bytes
    pub fn max_partition_bytes(mut self, bytes: u64) -> Self {
        self.config.max_partition_bytes = bytes.max(1);
        self
    }

    /// Set the minimum partition count
    pub fn min_partitions(mut self, partitions: usize) -> Self {
        self.config.min_partitions = partitions.max(1);
        self
    }

    /// Force a separator instead of detecting one
    pub fn separator(mut self, separator: Option<char>) -> Self {
        self.config.separator = separator;
        self
    }

    /// Enable or disable escaping of the derived file-name pattern
    pub fn escape_pattern(mut self, escape: bool) -> Self {
        self.config.escape_pattern = escape;
        self
    }

    /// Set the maximum number of rows inspected for typing (0 = all)
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.config.max_rows = rows;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();
        assert_eq!(config.sample_lines, 10);
        assert_eq!(config.min_partitions, 2);
        assert!(config.escape_pattern);
        assert!(config.separator.is_none());
    }

    #[test]
    fn test_builder() {
        let config = InferenceConfig::builder()
            .sample_lines(25)
            .max_partition_bytes(4096)
            .separator(Some('|'))
            .escape_pattern(false)
            .max_rows(500)
            .build();

        assert_eq!(config.sample_lines, 25);
        assert_eq!(config.max_partition_bytes, 4096);
        assert_eq!(config.separator, Some('|'));
        assert!(!config.escape_pattern);
        assert_eq!(config.max_rows, 500);
    }

    #[test]
    fn test_builder_clamping() {
        let config = InferenceConfig::builder()
            .sample_lines(0)
            .min_partitions(0)
            .max_partition_bytes(0)
            .build();

        assert_eq!(config.sample_lines, 1);
        assert_eq!(config.min_partitions, 1);
        assert_eq!(config.max_partition_bytes, 1);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = InferenceConfig::from_toml_str("sampleLines = 4\nseparator = \"|\"\n").unwrap();
        assert_eq!(config.sample_lines, 4);
        assert_eq!(config.separator, Some('|'));
        assert_eq!(config.max_partition_bytes, DEFAULT_MAX_PARTITION_BYTES);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        assert!(matches!(
            InferenceConfig::from_toml_str("sampleLines = 0"),
            Err(InferenceError::Config(_))
        ));
        assert!(matches!(
            InferenceConfig::from_toml_str("sampleLines = \"ten\""),
            Err(InferenceError::Config(_))
        ));
    }
}
