//! CLI module for the odm-infer binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
