//! Sample command implementation

use crate::cli::resolve_config;
use crate::core::convert::Converter;
use crate::core::sample::sample_message;
use clap::Args;

/// Arguments for the sample command
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Print the converted bundle instead of the message
    #[arg(long)]
    pub bundle: bool,
}

impl SampleArgs {
    /// Execute the sample command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        if !self.bundle {
            // One segment per line; the tokenizer accepts `\n` as well
            println!("{}", sample_message().replace('\r', "\n"));
            return Ok(0);
        }

        let config = match resolve_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        let bundle = Converter::from_config(&config).convert(sample_message())?;
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        Ok(0)
    }
}
