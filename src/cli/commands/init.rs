//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Ferry configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: ferry --config {} validate-config", self.output);
                println!("  3. Try it out: ferry sample | ferry convert");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Ferry Configuration File
# HL7 v2 to FHIR R4 converter

[application]
log_level = "info"

[conversion]
duplicate_ids = "suffix"
encounter_context = "last"
pretty = true

[conversion.identifier_systems]

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
local_max_files = 7
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Ferry Configuration File
# HL7 v2 to FHIR R4 converter
#
# Every setting has a default, so any section may be omitted.
# Values may reference environment variables as ${VAR_NAME}, and
# FERRY_<SECTION>_<KEY> variables override values from this file
# (for example FERRY_CONVERSION_PRETTY=false).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# Conversion Settings
# ============================================================================
[conversion]
# Two keyed segments (AL1, DG1, PR1, OBX) with the same set id:
#   suffix    - the later one becomes observation-1-2, observation-1-3, ...
#   overwrite - the later one replaces the earlier entry in place
duplicate_ids = "suffix"

# Encounter that Condition, Procedure and Observation resources link to:
#   last              - the last PV1 in the message
#   nearest-preceding - the closest PV1 before the segment
encounter_context = "last"

# Pretty-print bundle JSON (convert --compact overrides)
pretty = true

# Systems applied to identifiers whose assigning authority is empty.
# Values must be http(s) URLs or urns.
[conversion.identifier_systems]
medical_record = "urn:oid:2.16.840.1.113883.19.5"
# account = "urn:oid:2.16.840.1.113883.19.6"
# drivers_license = "urn:oid:2.16.840.1.113883.4.3.25"
# visit = "urn:oid:2.16.840.1.113883.19.7"
# policy = "urn:oid:2.16.840.1.113883.19.8"

# ============================================================================
# Logging Settings
# ============================================================================
[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"

# Rotated files kept before the oldest is deleted
local_max_files = 7
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_str, DuplicateIdPolicy};
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let cli = crate::cli::Cli::parse_from(["ferry", "init"]);
        match cli.command {
            crate::cli::Commands::Init(args) => {
                assert_eq!(args.output, "ferry.toml");
                assert!(!args.with_examples);
                assert!(!args.force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generated_configs_load() {
        let minimal = load_config_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.conversion.duplicate_ids, DuplicateIdPolicy::Suffix);

        let examples = load_config_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(
            examples.conversion.identifier_systems.medical_record.as_deref(),
            Some("urn:oid:2.16.840.1.113883.19.5")
        );
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ferry.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[conversion]"));
    }
}
