//! Detect command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::format_layout;
use crate::inference::SchemaInferrer;

use super::load_config;

/// Arguments for the `detect` command
#[derive(Debug, Clone, Default)]
pub struct DetectArgs {
    /// Data file to analyze
    pub input: PathBuf,
    /// Whether the first DSV row holds column names
    pub header: bool,
    /// TOML configuration file
    pub config: Option<PathBuf>,
}

/// Handle the `detect` command
pub fn handle_detect(args: &DetectArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let layout = SchemaInferrer::with_config(config).detect_layout(&args.input, args.header)?;

    println!("{}", format_layout(&layout));
    Ok(())
}
