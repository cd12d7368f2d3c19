//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Ferry using clap.
//!
//! Exit codes: `0` success, `1` invalid message, `2` configuration error,
//! `5` fatal error.

pub mod commands;

use crate::config::{load_config, load_config_str, FerryConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::Path;

/// Configuration file picked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "ferry.toml";

/// Ferry - HL7 v2 to FHIR R4 converter
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(version, about, long_about = None)]
#[command(author = "Ferry Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./ferry.toml when present)
    #[arg(short, long, env = "FERRY_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FERRY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an HL7 v2 message into a FHIR R4 bundle
    Convert(commands::convert::ConvertArgs),

    /// Check that a message looks like HL7 v2 and tokenizes
    Validate(commands::validate::ValidateArgs),

    /// Print the built-in sample message
    Sample(commands::sample::SampleArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate_config::ValidateConfigArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Loads the configuration a command should run with
///
/// An explicit path must exist. Without one, `ferry.toml` in the working
/// directory is used when present; otherwise defaults plus `FERRY_*`
/// environment overrides apply.
///
/// # Errors
///
/// Returns a configuration error when the file cannot be loaded or fails
/// validation.
pub fn resolve_config(path: Option<&str>) -> Result<FerryConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => load_config_str(""),
    }
}

/// Reads message text from a file, or stdin for `None` or `-`
///
/// Returns the text and a label naming its source.
pub fn read_input(path: Option<&str>) -> std::io::Result<(String, String)> {
    match path {
        Some(path) if path != "-" => Ok((std::fs::read_to_string(path)?, path.to_string())),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok((text, "stdin".to_string()))
        }
    }
}
