//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Ferry configuration file.

use crate::cli::{resolve_config, DEFAULT_CONFIG_PATH};
use crate::config::IdentifierSystems;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateConfigArgs {}

impl ValidateConfigArgs {
    /// Execute the validate-config command
    ///
    /// Loading already runs validation, so a config that loads is valid.
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        let config = match resolve_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Duplicate Ids: {:?}", config.conversion.duplicate_ids);
        println!(
            "  Encounter Context: {:?}",
            config.conversion.encounter_context
        );
        println!("  Pretty Output: {}", config.conversion.pretty);
        print_systems(&config.conversion.identifier_systems);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(0)
    }
}

fn print_systems(systems: &IdentifierSystems) {
    let entries = [
        ("Medical Record", &systems.medical_record),
        ("Account", &systems.account),
        ("Drivers License", &systems.drivers_license),
        ("Visit", &systems.visit),
        ("Policy", &systems.policy),
    ];
    for (label, system) in entries {
        if let Some(system) = system {
            println!("  {label} System: {system}");
        }
    }
}
