// Ferry - HL7 v2 to FHIR R4 converter
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

use clap::Parser;
use ferry::cli::{resolve_config, Cli, Commands};
use ferry::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging follows the config file when it loads; commands report
    // configuration errors themselves
    let config = resolve_config(cli.config.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Ferry - HL7 v2 to FHIR R4 converter"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Convert(args) => args.execute(config_path),
        Commands::Validate(args) => args.execute(),
        Commands::Sample(args) => args.execute(config_path),
        Commands::ValidateConfig(args) => args.execute(config_path),
        Commands::Init(args) => args.execute(),
    }
}
