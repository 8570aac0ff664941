//! Command line entry point for schema inference

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use data_modelling_infer::cli::commands::detect::{DetectArgs, handle_detect};
use data_modelling_infer::cli::commands::infer::{InferArgs, handle_infer};

#[derive(Parser, Debug)]
#[command(name = "odm-infer", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infer a schema configuration from a data file
    Infer {
        /// Domain name
        #[arg(short, long)]
        domain: String,

        /// Schema name
        #[arg(short, long)]
        schema: String,

        /// Data file to analyze
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the YAML configuration (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat the first row of a delimited file as column names
        #[arg(long)]
        header: bool,

        /// Force the field separator (single character, or "tab")
        #[arg(long)]
        separator: Option<String>,

        /// TOML file with inference settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of head lines used for separator detection
        #[arg(long)]
        sample_lines: Option<usize>,

        /// Maximum number of records read for typing (0 = all)
        #[arg(long)]
        max_rows: Option<usize>,

        /// Use the file name as a regular expression without escaping it
        #[arg(long)]
        raw_pattern: bool,
    },

    /// Print the detected format and separator of a data file
    Detect {
        /// Data file to analyze
        #[arg(short, long)]
        input: PathBuf,

        /// Treat the first row of a delimited file as column names
        #[arg(long)]
        header: bool,

        /// TOML file with inference settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Infer {
            domain,
            schema,
            input,
            output,
            header,
            separator,
            config,
            sample_lines,
            max_rows,
            raw_pattern,
        } => handle_infer(&InferArgs {
            domain,
            schema,
            input,
            output,
            header,
            separator,
            config,
            sample_lines,
            max_rows,
            raw_pattern,
        })?,
        Commands::Detect {
            input,
            header,
            config,
        } => handle_detect(&DetectArgs {
            input,
            header,
            config,
        })?,
    }

    Ok(())
}
