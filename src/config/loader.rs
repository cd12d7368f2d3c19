//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FerryConfig;
use crate::domain::errors::FerryError;
use crate::domain::result::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FerryConfig
/// 4. Applies environment variable overrides (FERRY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ferry::config::loader::load_config;
///
/// let config = load_config("ferry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FerryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FerryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text, applying the same substitution,
/// overrides and validation as [`load_config`]
pub fn load_config_str(contents: &str) -> Result<FerryConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: FerryConfig = toml::from_str(&contents)
        .map_err(|e| FerryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FerryError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comments are copied through untouched
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FerryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using FERRY_* prefix
///
/// Environment variables follow the pattern: FERRY_<SECTION>_<KEY>
/// For example: FERRY_APPLICATION_LOG_LEVEL, FERRY_CONVERSION_DUPLICATE_IDS
fn apply_env_overrides(config: &mut FerryConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("FERRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Conversion overrides
    if let Ok(val) = std::env::var("FERRY_CONVERSION_DUPLICATE_IDS") {
        config.conversion.duplicate_ids = parse_enum("FERRY_CONVERSION_DUPLICATE_IDS", &val)?;
    }
    if let Ok(val) = std::env::var("FERRY_CONVERSION_ENCOUNTER_CONTEXT") {
        config.conversion.encounter_context =
            parse_enum("FERRY_CONVERSION_ENCOUNTER_CONTEXT", &val)?;
    }
    if let Ok(val) = std::env::var("FERRY_CONVERSION_PRETTY") {
        config.conversion.pretty = val.parse().unwrap_or(true);
    }

    // Identifier system overrides
    let systems = &mut config.conversion.identifier_systems;
    if let Ok(val) = std::env::var("FERRY_IDENTIFIER_SYSTEMS_MEDICAL_RECORD") {
        systems.medical_record = Some(val);
    }
    if let Ok(val) = std::env::var("FERRY_IDENTIFIER_SYSTEMS_ACCOUNT") {
        systems.account = Some(val);
    }
    if let Ok(val) = std::env::var("FERRY_IDENTIFIER_SYSTEMS_DRIVERS_LICENSE") {
        systems.drivers_license = Some(val);
    }
    if let Ok(val) = std::env::var("FERRY_IDENTIFIER_SYSTEMS_VISIT") {
        systems.visit = Some(val);
    }
    if let Ok(val) = std::env::var("FERRY_IDENTIFIER_SYSTEMS_POLICY") {
        systems.policy = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Parses a kebab-case enum value the same way the TOML file spells it
fn parse_enum<T: DeserializeOwned>(name: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        FerryError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}
