//! FHIR R4 output model
//!
//! Serde-serializable datatypes, resources and the collection bundle. Optional
//! elements are `Option`/`Vec` and are omitted from JSON when empty.

pub mod bundle;
pub mod datatypes;
pub mod resources;

pub use bundle::{Bundle, BundleEntry, BundleType};
pub use datatypes::{
    Address, AddressUse, CodeableConcept, Coding, ContactPoint, ContactPointUse, Extension,
    HumanName, Identifier, Period, Quantity, Reference,
};
pub use resources::Resource;
