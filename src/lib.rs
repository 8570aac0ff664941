//! Data Modelling Infer - schema inference for data files of unknown layout
//!
//! Provides:
//! - Container format classification (JSON lines, JSON array, delimited text)
//! - Field delimiter detection
//! - Column schema derivation through a pluggable typed reader
//! - Assembly into a Domain/Schema/Attribute configuration model
//! - YAML export of the configuration

#[cfg(feature = "cli")]
pub mod cli;
pub mod export;
pub mod inference;
pub mod models;

// Re-export commonly used types
pub use export::{ExportError, YamlConfigWriter};
pub use inference::{
    DetectedLayout, InferenceConfig, InferenceError, NativeReader, SchemaInferrer, TypedReader,
    infer_schema,
};

// Re-export models
pub use models::{Attribute, AttributeType, Domain, Format, Metadata, Schema};
