//! Configuration schema types
//!
//! This module defines the configuration structure for Ferry. Every section
//! has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Handling of two keyed resources that would receive the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// Later duplicates get `-2`, `-3`, ... appended
    #[default]
    Suffix,
    /// A later resource replaces the earlier one in place
    Overwrite,
}

/// Which encounter clinical resources are linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterContext {
    /// The last encounter in the message
    #[default]
    Last,
    /// The closest encounter appearing before the segment; the last one when
    /// none precedes it
    NearestPreceding,
}

/// Main Ferry configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FerryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Conversion behaviour
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FerryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.conversion.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Duplicate keyed id handling
    #[serde(default)]
    pub duplicate_ids: DuplicateIdPolicy,

    /// Encounter linking policy
    #[serde(default)]
    pub encounter_context: EncounterContext,

    /// Pretty-print bundle JSON
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Default identifier systems
    #[serde(default)]
    pub identifier_systems: IdentifierSystems,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicateIdPolicy::default(),
            encounter_context: EncounterContext::default(),
            pretty: default_true(),
            identifier_systems: IdentifierSystems::default(),
        }
    }
}

impl ConversionConfig {
    fn validate(&self) -> Result<(), String> {
        self.identifier_systems.validate()
    }
}

/// Systems applied to identifiers that carry no assigning authority
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IdentifierSystems {
    /// Medical record numbers (PID-3)
    #[serde(default)]
    pub medical_record: Option<String>,

    /// Patient account numbers (PID-18)
    #[serde(default)]
    pub account: Option<String>,

    /// Driver's license numbers (PID-20)
    #[serde(default)]
    pub drivers_license: Option<String>,

    /// Visit numbers (PV1-19)
    #[serde(default)]
    pub visit: Option<String>,

    /// Insurance policy numbers (IN1-36)
    #[serde(default)]
    pub policy: Option<String>,
}

impl IdentifierSystems {
    fn validate(&self) -> Result<(), String> {
        let entries = [
            ("medical_record", &self.medical_record),
            ("account", &self.account),
            ("drivers_license", &self.drivers_license),
            ("visit", &self.visit),
            ("policy", &self.policy),
        ];
        for (name, value) in entries {
            if let Some(system) = value {
                if !is_uri(system) {
                    return Err(format!(
                        "conversion.identifier_systems.{name} must be an http(s) URL or a urn, got '{system}'"
                    ));
                }
            }
        }
        Ok(())
    }
}

fn is_uri(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("urn:")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Rotated log files kept before the oldest is deleted
    #[serde(default = "default_local_max_files")]
    pub local_max_files: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_files == 0 {
            return Err("logging.local_max_files must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_files: default_local_max_files(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_files() -> usize {
    7
}
