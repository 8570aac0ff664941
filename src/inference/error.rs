//! Error types for schema inference

use std::path::PathBuf;

use thiserror::Error;

use super::reader::ReadError;
use crate::export::ExportError;

/// Errors that can occur while inferring a schema
///
/// The pipeline stops at the first error; no configuration file is written
/// when any variant is returned.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The data file has no lines to sample
    #[error("No lines to sample in {}", path.display())]
    EmptyInput { path: PathBuf },

    /// The file could not be read under the detected options
    #[error(transparent)]
    Read(#[from] ReadError),

    /// The derived file-name pattern is not a valid regular expression
    #[error("Invalid file name pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration could not be persisted
    #[error(transparent)]
    Write(#[from] ExportError),

    /// The data path has no file name component
    #[error("Data path has no file name: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// The reader reported the same column name twice
    #[error("Duplicate attribute '{name}' in schema '{schema}'")]
    DuplicateAttribute { schema: String, name: String },

    /// Invalid inference configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;
