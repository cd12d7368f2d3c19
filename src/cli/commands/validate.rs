//! Validate command implementation
//!
//! Runs the structural message check and then the tokenizer, reporting the
//! segments found.

use crate::adapters::hl7::parse_message;
use crate::cli::read_input;
use crate::core::convert::validate;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Message file; reads stdin when omitted or `-`
    pub input: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let (text, source) = read_input(self.input.as_deref())?;
        tracing::info!(source = %source, "Validating message");

        if !validate(&text) {
            println!("❌ {source}: not an HL7 v2 message (expected MSH header and field separator)");
            return Ok(1); // Invalid message exit code
        }

        match parse_message(&text) {
            Ok(message) => {
                let types: Vec<&str> = message
                    .segments
                    .iter()
                    .map(|segment| segment.segment_type.as_str())
                    .collect();
                println!("✅ {source}: valid message");
                println!("   Segments ({}): {}", types.len(), types.join(" "));
                Ok(0)
            }
            Err(e) => {
                println!("❌ {source}: {e}");
                Ok(1) // Invalid message exit code
            }
        }
    }
}
