//! Core conversion engine for Ferry.
//!
//! # Modules
//!
//! - [`normalize`] - HL7 datatype to FHIR datatype normalizers
//! - [`tables`] - Code tables and terminology system URIs
//! - [`mappers`] - One resource builder per segment kind
//! - [`ids`] - Resource id assignment and duplicate handling
//! - [`assembler`] - Bundle assembly, ordering and context threading
//! - [`convert`] - Public conversion entry points
//! - [`sample`] - Built-in sample message
//!
//! # Conversion Workflow
//!
//! 1. **Tokenize**: split raw text into segments ([`crate::adapters::hl7`])
//! 2. **Discover**: scan segments once in source order
//! 3. **Map**: build one resource per recognised segment
//! 4. **Identify**: assign ids and cross-references
//! 5. **Assemble**: emit entries grouped by resource type
//!
//! # Example
//!
//! ```rust
//! use ferry::config::load_config_str;
//! use ferry::core::convert::Converter;
//! use ferry::core::sample::sample_message;
//!
//! let config = load_config_str("[conversion]\nencounter_context = \"nearest-preceding\"\n").unwrap();
//! let converter = Converter::from_config(&config);
//!
//! let bundle = converter.convert(sample_message()).unwrap();
//! println!("{}", serde_json::to_string_pretty(&bundle).unwrap());
//! ```

pub mod assembler;
pub mod convert;
pub mod ids;
pub mod mappers;
pub mod normalize;
pub mod sample;
pub mod tables;

pub use convert::{convert, validate, Converter};
pub use sample::sample_message;
