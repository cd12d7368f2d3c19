//! Configuration management for Ferry.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Ferry uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FERRY_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ferry::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ferry.toml")?;
//!
//! println!("Duplicate ids: {:?}", config.conversion.duplicate_ids);
//! println!("Encounter context: {:?}", config.conversion.encounter_context);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ConversionConfig`] - Id policy, encounter linking, output format
//! - [`IdentifierSystems`] - Default identifier systems
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [conversion]
//! duplicate_ids = "suffix"
//! encounter_context = "last"
//! pretty = true
//!
//! [conversion.identifier_systems]
//! medical_record = "urn:oid:2.16.840.1.113883.19.5"
//! visit = "${FERRY_VISIT_SYSTEM}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, ConversionConfig, DuplicateIdPolicy, EncounterContext, FerryConfig,
    IdentifierSystems, LoggingConfig,
};
