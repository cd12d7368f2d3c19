// Ferry - HL7 v2 to FHIR R4 converter
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

//! # Ferry - HL7 v2 to FHIR R4 converter
//!
//! Ferry converts HL7 v2.x clinical messages into FHIR R4 collection bundles.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Tokenizing** pipe-delimited HL7 v2 text into typed segments and fields
//! - **Normalizing** HL7 datatypes (names, addresses, identifiers, coded
//!   elements, quantities, timestamps) into FHIR datatypes
//! - **Mapping** MSH, PID, PV1, NK1, AL1, DG1, PR1, IN1/IN2 and OBX segments
//!   to FHIR resources
//! - **Assembling** a bundle with stable ids and cross-references
//!
//! ## Architecture
//!
//! Ferry follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Conversion engine (normalizers, mappers, ids, assembly)
//! - [`adapters`] - Wire format integrations (HL7 v2 tokenizer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use ferry::core::convert::convert;
//! use ferry::domain::ResourceType;
//!
//! let message = "MSH|^~\\&|APP|FAC|||20240115083000||ORU^R01|MSG1|P|2.5\r\
//!                PID|1||12345^^^HOSP^MR||DOE^JOHN||19800101|M\r\
//!                OBX|1|NM|8867-4^Heart rate^LN||72|/min|||||F";
//!
//! let bundle = convert(message).unwrap();
//! assert_eq!(bundle.resources_of(ResourceType::Observation).len(), 1);
//!
//! println!("{}", serde_json::to_string_pretty(&bundle).unwrap());
//! ```
//!
//! ## Error Handling
//!
//! Ferry uses the [`domain::FerryError`] type for all errors. Tokenizer
//! failures arrive unchanged as [`domain::FerryError::Parse`]:
//!
//! ```rust
//! use ferry::core::convert::convert;
//! use ferry::domain::{FerryError, ParseError};
//!
//! assert!(matches!(convert("   "), Err(FerryError::Input(_))));
//! assert!(matches!(
//!     convert("PID|1"),
//!     Err(FerryError::Parse(ParseError::MissingHeader))
//! ));
//! ```
//!
//! Fields that are missing or malformed never fail a conversion; they are
//! left out of the resource.
//!
//! ## Logging
//!
//! Ferry uses structured logging with the `tracing` crate. The engine only
//! emits debug-level events.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
