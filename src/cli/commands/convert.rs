//! Convert command implementation
//!
//! Reads one HL7 v2 message from a file or stdin and writes the FHIR R4
//! bundle as JSON to a file or stdout.

use crate::cli::{read_input, resolve_config};
use crate::core::convert::Converter;
use crate::domain::fhir::Bundle;
use crate::domain::FerryError;
use crate::{log_conversion_complete, log_conversion_start, log_error_with_context};
use clap::Args;
use std::fs;
use std::time::Instant;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Message file; reads stdin when omitted or `-`
    pub input: Option<String>,

    /// Write the bundle to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit compact JSON regardless of configuration
    #[arg(long)]
    pub compact: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let (text, source) = read_input(self.input.as_deref())?;
        log_conversion_start!(source, text.len());
        let start = Instant::now();

        let converter = Converter::from_config(&config);
        let bundle = match converter.convert(&text) {
            Ok(bundle) => bundle,
            Err(e @ (FerryError::Input(_) | FerryError::Parse(_))) => {
                log_error_with_context!(&e, "Invalid message");
                eprintln!("❌ Invalid message: {e}");
                return Ok(1); // Invalid message exit code
            }
            Err(e) => return Err(e.into()),
        };

        let json = render(&bundle, config.conversion.pretty && !self.compact)?;
        match &self.output {
            Some(path) => {
                fs::write(path, format!("{json}\n"))?;
                eprintln!("✅ Wrote {} entries to {}", bundle.len(), path);
            }
            None => println!("{json}"),
        }

        log_conversion_complete!(bundle.len(), start.elapsed());
        Ok(0)
    }
}

fn render(bundle: &Bundle, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(bundle)
    } else {
        serde_json::to_string(bundle)
    }
}
