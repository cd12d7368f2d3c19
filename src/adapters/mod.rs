//! External format integrations for Ferry.
//!
//! - [`hl7`] - HL7 v2 pipe-delimited tokenizer
//!
//! # Design Pattern
//!
//! Adapters isolate wire formats from the mapping engine behind a trait, so
//! the engine can be driven by any tokenizer:
//!
//! ```rust
//! use ferry::adapters::hl7::{MessageTokenizer, PipeTokenizer};
//!
//! let message = PipeTokenizer.tokenize("MSH|^~\\&|APP\rPV1|1|I").unwrap();
//! assert_eq!(message.segments.len(), 2);
//! ```

pub mod hl7;
