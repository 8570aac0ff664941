//! Schema inference pipeline
//!
//! Sampler → format detection → separator detection (DSV only) → typed read →
//! schema assembly → configuration export. Each step runs to completion before
//! the next starts and the first failure ends the run.

use std::path::Path;

use tracing::{info, info_span, warn};

use super::assembler::{DetectedLayout, assemble_domain};
use super::config::InferenceConfig;
use super::error::InferenceError;
use super::formats::{Format, detect_format};
use super::reader::{NativeReader, ReadRequest, TypedReader};
use super::sampler::LineSampler;
use super::separator::detect_separator;
use crate::export::YamlConfigWriter;
use crate::models::Domain;

/// Schema inference engine
///
/// Generic over the [`TypedReader`] that performs the typed read, so callers
/// can plug in their own engine.
pub struct SchemaInferrer<R = NativeReader> {
    config: InferenceConfig,
    sampler: LineSampler,
    reader: R,
    writer: YamlConfigWriter,
}

impl SchemaInferrer<NativeReader> {
    /// Create an inferrer with default configuration and the native reader
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an inferrer with custom configuration and the native reader
    pub fn with_config(config: InferenceConfig) -> Self {
        let reader = NativeReader::with_max_rows(config.max_rows);
        Self::with_reader(config, reader)
    }
}

impl Default for SchemaInferrer<NativeReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TypedReader> SchemaInferrer<R> {
    /// Create an inferrer backed by a custom typed reader
    pub fn with_reader(config: InferenceConfig, reader: R) -> Self {
        Self {
            sampler: LineSampler::from_config(&config),
            config,
            reader,
            writer: YamlConfigWriter::new(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Detect the container format and, for DSV, the separator of a file
    pub fn detect_layout(
        &self,
        data_path: &Path,
        header: bool,
    ) -> Result<DetectedLayout, InferenceError> {
        self.config.validate()?;
        let sample = self.sampler.sample(data_path)?;
        let format = detect_format(&sample.first, &sample.last);

        let separator = match format {
            Format::Dsv => match self.config.separator {
                Some(forced) => Some(forced),
                None => {
                    let detected = detect_separator(&sample.head);
                    if detected.is_none() {
                        warn!(
                            path = %data_path.display(),
                            "No separator candidate found; each line is read as a single column"
                        );
                    }
                    detected
                }
            },
            Format::Json | Format::ArrayJson => None,
        };

        info!(
            format = %format,
            separator = ?separator,
            partitions = sample.partitions,
            "Detected layout"
        );

        Ok(DetectedLayout {
            format,
            header,
            separator,
        })
    }

    /// Infer the domain describing a data file
    pub fn infer(
        &self,
        domain_name: &str,
        schema_name: &str,
        data_path: &Path,
        header: bool,
    ) -> Result<Domain, InferenceError> {
        let _span = info_span!(
            "infer_schema",
            domain = domain_name,
            schema = schema_name,
            path = %data_path.display()
        )
        .entered();

        let layout = self.detect_layout(data_path, header)?;

        let columns = self.reader.read_schema(&ReadRequest {
            path: data_path,
            format: layout.format,
            separator: layout.separator,
            header: layout.header,
        })?;
        info!(columns = columns.len(), "Read typed schema");

        assemble_domain(
            domain_name,
            schema_name,
            data_path,
            &layout,
            columns,
            self.config.escape_pattern,
        )
    }

    /// Infer the domain describing a data file and write it to `save_path`
    ///
    /// Nothing is written unless every step succeeds.
    pub fn infer_to_file(
        &self,
        domain_name: &str,
        schema_name: &str,
        data_path: &Path,
        save_path: &Path,
        header: bool,
    ) -> Result<(), InferenceError> {
        let domain = self.infer(domain_name, schema_name, data_path, header)?;
        self.writer.write(&domain, save_path)?;
        Ok(())
    }
}

/// Infer the schema of `data_path` and write the configuration to `save_path`
///
/// Uses the default configuration and the native reader.
///
/// ```rust,no_run
/// use std::path::Path;
/// use data_modelling_infer::inference::infer_schema;
///
/// infer_schema(
///     "sales",
///     "orders",
///     Path::new("/data/orders.csv"),
///     Path::new("sales.yml"),
///     true,
/// )?;
/// # Ok::<(), data_modelling_infer::inference::InferenceError>(())
/// ```
pub fn infer_schema(
    domain_name: &str,
    schema_name: &str,
    data_path: &Path,
    save_path: &Path,
    header: bool,
) -> Result<(), InferenceError> {
    SchemaInferrer::new().infer_to_file(domain_name, schema_name, data_path, save_path, header)
}
