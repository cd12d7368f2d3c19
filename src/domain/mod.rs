//! Domain models and types for Ferry.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **HL7 v2 input model** ([`ParsedMessage`], [`Segment`], [`RawField`])
//! - **FHIR R4 output model** ([`fhir::Bundle`], [`fhir::Resource`] and datatypes)
//! - **Resource identifiers** ([`ResourceType`], [`AssignedId`])
//! - **Error types** ([`FerryError`], [`ParseError`])
//! - **Result type alias** ([`Result`])
//!
//! # Field shapes
//!
//! Fields are an explicit tagged variant. Accessors never guess whether an
//! array means components or repetitions:
//!
//! ```rust
//! use ferry::domain::{Component, FieldValue, RawField};
//!
//! let one_value = RawField::Components(vec![
//!     Component::Text("DOE".to_string()),
//!     Component::Text("JOHN".to_string()),
//! ]);
//! assert_eq!(one_value.values().len(), 1);
//!
//! let repeated = RawField::Repetition(vec![
//!     FieldValue::Scalar("2106-3".to_string()),
//!     FieldValue::Scalar("2054-5".to_string()),
//! ]);
//! assert_eq!(repeated.values().len(), 2);
//! ```

pub mod errors;
pub mod fhir;
pub mod field;
pub mod ids;
pub mod message;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FerryError, ParseError};
pub use field::{Component, FieldValue, Instance, RawField};
pub use ids::{AssignedId, ResourceType};
pub use message::{ParsedMessage, Segment, SegmentFields, SegmentKind};
pub use result::Result;
