//! Export functionality
//!
//! Renders an inferred [`Domain`](crate::models::Domain) as a configuration
//! document and persists it.

pub mod yaml;

use std::path::PathBuf;

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Failed to write {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub use yaml::YamlConfigWriter;
