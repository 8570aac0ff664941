//! Schema inference engine for data files of unknown layout
//!
//! This module classifies a data file's container format, detects its field
//! delimiter, obtains a typed column list from a [`TypedReader`] and assembles
//! the result into a [`Domain`](crate::models::Domain) configuration.
//!
//! ## Features
//!
//! - **Line sampling** - First/last line in true file order under partitioned scans
//! - **Format detection** - JSON lines, JSON array, or delimiter-separated values
//! - **Separator detection** - Most frequent non-text character of a head sample
//! - **Typed reading** - Pluggable engine; [`NativeReader`] is bundled
//! - **Schema assembly** - Attributes, file pattern, domain directory and metadata
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use data_modelling_infer::inference::{InferenceConfig, SchemaInferrer};
//!
//! let inferrer = SchemaInferrer::with_config(InferenceConfig::default());
//! let domain = inferrer.infer("sales", "orders", Path::new("/data/orders.csv"), true)?;
//! inferrer.infer_to_file("sales", "orders", Path::new("/data/orders.csv"), Path::new("sales.yml"), true)?;
//! ```

mod assembler;
mod config;
mod error;
mod formats;
mod inferrer;
mod reader;
mod sampler;
mod separator;
mod types;

pub use assembler::{DetectedLayout, assemble_domain, file_pattern, split_path};
pub use config::{
    DEFAULT_MAX_PARTITION_BYTES, DEFAULT_MIN_PARTITIONS, DEFAULT_SAMPLE_LINES, InferenceConfig,
    InferenceConfigBuilder,
};
pub use error::{InferenceError, InferenceResult};
pub use formats::{Format, detect_format};
pub use inferrer::{SchemaInferrer, infer_schema};
pub use reader::{ColumnSchema, NativeReader, ReadError, ReadRequest, TypedReader};
pub use sampler::{LineSample, LineSampler};
pub use separator::{candidate_counts, detect_separator, is_noise};
pub use types::InferredType;
