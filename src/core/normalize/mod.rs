//! HL7 datatype normalizers
//!
//! Pure functions turning raw field values into FHIR datatypes. Every
//! normalizer returns `Option`: `None` means the source had no usable content
//! and the caller omits the element. Nothing here logs or fails.

pub mod address;
pub mod coded;
pub mod datetime;
pub mod identifier;
pub mod name;
pub mod quantity;

pub use address::normalize_address;
pub use coded::normalize_coded;
pub use datetime::{normalize_date, normalize_datetime};
pub use identifier::{identifier_type, normalize_identifier, IdentifierOptions};
pub use name::normalize_name;
pub use quantity::{normalize_quantity, parse_number, Unit};

use crate::core::tables::gender_for;
use crate::domain::fhir::resources::AdministrativeGender;

/// Normalizes an administrative sex code (case-insensitive, default `unknown`)
///
/// # Examples
///
/// ```
/// use ferry::core::normalize::normalize_gender;
///
/// assert_eq!(normalize_gender("m").as_str(), "male");
/// assert_eq!(normalize_gender("").as_str(), "unknown");
/// ```
pub fn normalize_gender(code: &str) -> AdministrativeGender {
    gender_for(Some(code))
}
