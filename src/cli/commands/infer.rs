//! Infer command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::format_domain_summary;
use crate::export::YamlConfigWriter;
use crate::inference::SchemaInferrer;

use super::{load_config, parse_separator};

/// Arguments for the `infer` command
#[derive(Debug, Clone, Default)]
pub struct InferArgs {
    /// Domain name recorded in the configuration
    pub domain: String,
    /// Schema name recorded in the configuration
    pub schema: String,
    /// Data file to analyze
    pub input: PathBuf,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Whether the first DSV row holds column names
    pub header: bool,
    /// Forced separator
    pub separator: Option<String>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Head sample size override
    pub sample_lines: Option<usize>,
    /// Typing row limit override
    pub max_rows: Option<usize>,
    /// Compile the file name as written instead of escaping it
    pub raw_pattern: bool,
}

/// Handle the `infer` command
pub fn handle_infer(args: &InferArgs) -> Result<(), CliError> {
    if args.domain.trim().is_empty() || args.schema.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "Domain and schema names must not be empty".to_string(),
        ));
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(separator) = args.separator.as_deref() {
        config.separator = Some(parse_separator(separator)?);
    }
    if let Some(lines) = args.sample_lines {
        config.sample_lines = lines.max(1);
    }
    if let Some(rows) = args.max_rows {
        config.max_rows = rows;
    }
    if args.raw_pattern {
        config.escape_pattern = false;
    }
    config.validate()?;

    eprintln!("Inferring schema from {}...", args.input.display());

    let inferrer = SchemaInferrer::with_config(config);
    let domain = inferrer.infer(&args.domain, &args.schema, &args.input, args.header)?;

    eprintln!("{}", format_domain_summary(&domain));

    let writer = YamlConfigWriter::new();
    match args.output {
        Some(ref output_path) => {
            writer.write(&domain, output_path)?;
            eprintln!("Configuration written to: {}", output_path.display());
        }
        None => println!("{}", writer.to_string(&domain)?),
    }

    Ok(())
}
