//! YAML configuration writer

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::ExportError;
use crate::models::Domain;

/// Writes a domain as a YAML configuration document
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigWriter;

impl YamlConfigWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render a domain as YAML
    pub fn to_string(&self, domain: &Domain) -> Result<String, ExportError> {
        serde_yaml::to_string(domain).map_err(|e| {
            ExportError::SerializationError(format!("Failed to serialize domain: {}", e))
        })
    }

    /// Write a domain to `path`, replacing any existing file
    ///
    /// The document is rendered in full before anything touches the disk and
    /// is moved into place from a sibling temporary file, so a failed write
    /// leaves the target untouched.
    pub fn write(&self, domain: &Domain, path: &Path) -> Result<(), ExportError> {
        let content = self.to_string(domain)?;
        let staging = staging_path(path)?;

        if let Err(e) = write_staged(&staging, content.as_bytes(), path) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        info!(
            "Saved domain '{}' ({} schemas) to {}",
            domain.name,
            domain.schemas.len(),
            path.display()
        );
        Ok(())
    }
}

/// Write `content` to the staging file, then move it over `target`
fn write_staged(staging: &Path, content: &[u8], target: &Path) -> Result<(), ExportError> {
    fs::write(staging, content).map_err(|e| ExportError::IoError {
        path: staging.to_path_buf(),
        source: e,
    })?;
    fs::rename(staging, target).map_err(|e| ExportError::IoError {
        path: target.to_path_buf(),
        source: e,
    })
}

fn staging_path(path: &Path) -> Result<PathBuf, ExportError> {
    let file_name = path.file_name().ok_or_else(|| ExportError::IoError {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}
