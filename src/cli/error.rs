//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportError;
use crate::inference::InferenceError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file could not be loaded
    #[error("Failed to load configuration {}: {source}", path.display())]
    ConfigError {
        path: PathBuf,
        #[source]
        source: InferenceError,
    },

    /// Inference failed
    #[error("Inference failed: {0}")]
    InferenceError(#[from] InferenceError),

    /// Rendering the configuration failed
    #[error("Export failed: {0}")]
    ExportError(#[from] ExportError),
}
