//! CLI command implementations

pub mod detect;
pub mod infer;

use std::path::Path;

use crate::cli::error::CliError;
use crate::inference::InferenceConfig;

/// Load the inference configuration from an optional TOML file
pub(crate) fn load_config(path: Option<&Path>) -> Result<InferenceConfig, CliError> {
    match path {
        Some(path) => {
            InferenceConfig::from_toml_file(path).map_err(|source| CliError::ConfigError {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(InferenceConfig::default()),
    }
}

/// Parse a separator argument: a single character, or `\t` / `tab`
pub fn parse_separator(value: &str) -> Result<char, CliError> {
    if matches!(value, "\\t" | "tab") {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' && c != '\r' => Ok(c),
        _ => Err(CliError::InvalidArgument(format!(
            "Separator must be a single character, got '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(";").unwrap(), ';');
        assert_eq!(parse_separator("\\t").unwrap(), '\t');
        assert_eq!(parse_separator("tab").unwrap(), '\t');
        assert!(parse_separator("").is_err());
        assert!(parse_separator(";;").is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let result = load_config(Some(Path::new("/nonexistent/infer.toml")));
        assert!(matches!(result, Err(CliError::ConfigError { .. })));
        assert_eq!(load_config(None).unwrap(), InferenceConfig::default());
    }
}
